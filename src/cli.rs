use clap::{Parser, ValueEnum};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "upper",
    version,
    about = "Upgrade installed packages with every package manager found on the host"
)]
pub struct Cli {
    /// Show package manager output live and print debugging information
    #[arg(short, long)]
    pub verbose: bool,

    /// Report format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Run upgrade commands without sudo
    #[arg(long)]
    pub no_sudo: bool,

    /// Print a shell completion script and exit
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}

impl ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Plain, OutputFormat::Table, OutputFormat::Json]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            OutputFormat::Plain => Some(clap::builder::PossibleValue::new("plain")),
            OutputFormat::Table => Some(clap::builder::PossibleValue::new("table")),
            OutputFormat::Json => Some(clap::builder::PossibleValue::new("json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_defaults() {
        let cli = Cli::try_parse_from(["upper"]).unwrap();
        assert!(!cli.verbose);
        assert!(!cli.no_sudo);
        assert_eq!(cli.format, OutputFormat::Plain);
        assert!(cli.completions.is_none());
    }

    #[test]
    fn test_short_verbose() {
        let cli = Cli::try_parse_from(["upper", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_format_json() {
        let cli = Cli::try_parse_from(["upper", "--format", "json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["upper", "--format", "xml"]).is_err());
    }
}
