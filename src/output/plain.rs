use crate::outcome::Report;
use crate::output::status_text;

pub fn format_plain(
    report: &Report,
    w: &mut dyn std::io::Write,
    no_color: bool,
) -> anyhow::Result<()> {
    if report.outcomes.is_empty() {
        writeln!(w, "no package managers found")?;
        return Ok(());
    }

    for outcome in &report.outcomes {
        let status = status_text(outcome.status, no_color);
        match outcome.detail() {
            Some(detail) => writeln!(w, "{}: {} ({})", outcome.manager, status, detail)?,
            None => writeln!(w, "{}: {}", outcome.manager, status)?,
        }
    }

    if report.reboot_required {
        writeln!(w, "reboot required")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::PackageManager;
    use crate::outcome::UpgradeOutcome;

    fn render(report: &Report) -> String {
        let mut buf = Vec::new();
        format_plain(report, &mut buf, true).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_empty() {
        assert_eq!(render(&Report::default()), "no package managers found\n");
    }

    #[test]
    fn test_plain_single_success() {
        let report = Report {
            outcomes: vec![UpgradeOutcome::succeeded(PackageManager::Apt)],
            ..Report::default()
        };
        assert_eq!(render(&report), "APT: succeeded\n");
    }

    #[test]
    fn test_plain_failure_has_detail() {
        let report = Report {
            outcomes: vec![
                UpgradeOutcome::succeeded(PackageManager::Apt),
                UpgradeOutcome::failed(PackageManager::Pipx, Some(2), "exit status 2".to_string()),
            ],
            ..Report::default()
        };
        assert_eq!(render(&report), "APT: succeeded\npipx: failed (exit status 2)\n");
    }

    #[test]
    fn test_plain_skipped_and_reboot() {
        let report = Report {
            outcomes: vec![
                UpgradeOutcome::succeeded(PackageManager::Apt),
                UpgradeOutcome::skipped(PackageManager::Npm),
            ],
            interrupted: true,
            reboot_required: true,
        };
        let output = render(&report);
        assert!(output.contains("npm: skipped (not attempted: run interrupted)"));
        assert!(output.ends_with("reboot required\n"));
    }

    #[test]
    fn test_plain_no_ansi_without_color() {
        let report = Report {
            outcomes: vec![UpgradeOutcome::succeeded(PackageManager::Snap)],
            ..Report::default()
        };
        assert!(!render(&report).contains("\x1b["));
    }
}
