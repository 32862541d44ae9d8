use crate::outcome::Report;

pub fn format_json(report: &Report, w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(w, "{}", json)?;
    Ok(())
}
