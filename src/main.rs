mod cli;
mod error;
mod exec;
mod interrupt;
mod logger;
mod manager;
mod outcome;
mod output;
mod registry;

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use cli::Cli;
use output::Formatter;
use registry::{PackageManagerRegistry, Settings};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "upper", &mut std::io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    logger::init(cli.verbose, cli.no_color);
    if let Err(e) = interrupt::install() {
        log::warn!("Ctrl+C will abort without a report: {}", e);
    }

    let registry = PackageManagerRegistry::new(Settings::from_env(cli.verbose, cli.no_sudo));
    let report = match registry.run_all() {
        Ok(report) => report,
        Err(e) => {
            log::error!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let no_color = cli.no_color || !std::io::stdout().is_terminal();
    let formatter = Formatter::new(cli.format, no_color);
    formatter.format_report(&report, &mut std::io::stdout())?;

    Ok(ExitCode::from(report.exit_code()))
}
