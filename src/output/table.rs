use comfy_table::{Cell, ContentArrangement, Table};

use crate::outcome::Report;
use crate::output::status_text;

pub fn format_table(
    report: &Report,
    w: &mut dyn std::io::Write,
    no_color: bool,
) -> anyhow::Result<()> {
    if report.outcomes.is_empty() {
        writeln!(w, "no package managers found")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Manager", "Status", "Exit code", "Details"]);

    for outcome in &report.outcomes {
        table.add_row(vec![
            Cell::new(outcome.manager.name()),
            Cell::new(status_text(outcome.status, no_color)),
            Cell::new(
                outcome
                    .exit_code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(outcome.detail().unwrap_or_default()),
        ]);
    }

    writeln!(w, "{}", table)?;
    if report.reboot_required {
        writeln!(w, "reboot required")?;
    }
    Ok(())
}
