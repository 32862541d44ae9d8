pub mod json;
pub mod plain;
pub mod table;

use owo_colors::OwoColorize;

use crate::outcome::{Report, UpgradeStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Plain,
    Table,
    Json,
}

pub struct Formatter {
    format: OutputFormat,
    no_color: bool,
}

impl Formatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    pub fn format_report(
        &self,
        report: &Report,
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Plain => plain::format_plain(report, w, self.no_color),
            OutputFormat::Table => table::format_table(report, w, self.no_color),
            OutputFormat::Json => json::format_json(report, w),
        }
    }
}

pub(crate) fn status_text(status: UpgradeStatus, no_color: bool) -> String {
    let text = status.to_string();
    if no_color {
        return text;
    }
    match status {
        UpgradeStatus::Succeeded => text.green().to_string(),
        UpgradeStatus::Failed => text.red().to_string(),
        UpgradeStatus::Skipped => text.yellow().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager::PackageManager;
    use crate::outcome::UpgradeOutcome;

    fn sample_report() -> Report {
        Report {
            outcomes: vec![
                UpgradeOutcome::succeeded(PackageManager::Apt),
                UpgradeOutcome::failed(PackageManager::Pipx, Some(2), "exit status 2".to_string()),
            ],
            interrupted: false,
            reboot_required: false,
        }
    }

    #[test]
    fn test_format_report_each_format() {
        let report = sample_report();

        for format in [OutputFormat::Plain, OutputFormat::Table, OutputFormat::Json] {
            let formatter = Formatter::new(format, true);
            let mut buf = Vec::new();
            formatter.format_report(&report, &mut buf).unwrap();
            let output = String::from_utf8(buf).unwrap();
            assert!(output.contains("pipx"), "Format {:?} lost the pipx outcome", format);
        }
    }

    #[test]
    fn test_status_text_no_color() {
        assert_eq!(status_text(UpgradeStatus::Failed, true), "failed");
    }

    #[test]
    fn test_status_text_color() {
        let text = status_text(UpgradeStatus::Succeeded, false);
        assert!(text.contains("\x1b["));
        assert!(text.contains("succeeded"));
    }
}
