use std::io::{IsTerminal, Write};

use env_logger::{Builder, Env};
use log::{Level, LevelFilter};
use owo_colors::{OwoColorize, Style};

/// Environment variable holding an env_logger filter, e.g. `UPPER_LOG=debug`.
pub const LOG_ENV: &str = "UPPER_LOG";

const PREFIX: &str = "(upper) ";

pub fn init(verbose: bool, no_color: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let color = !no_color && std::io::stderr().is_terminal();

    Builder::new()
        .filter_level(level)
        .parse_env(Env::new().filter(LOG_ENV))
        .format(move |buf, record| {
            writeln!(buf, "{}", render(record.level(), &record.args().to_string(), color))
        })
        .init();
}

fn render(level: Level, message: &str, color: bool) -> String {
    let (label, style) = match level {
        Level::Error => ("error: ", Style::new().bold().red()),
        Level::Warn => ("warning: ", Style::new().bold().yellow()),
        Level::Info => ("", Style::new().bold().blue()),
        Level::Debug | Level::Trace => ("debug: ", Style::new().dimmed()),
    };

    if !color {
        return format!("{}{}{}", PREFIX, label, message);
    }

    match level {
        // Only the tag is highlighted
        Level::Error | Level::Warn => {
            format!("{}{}", format!("{}{}", PREFIX, label).style(style), message)
        }
        _ => format!("{}{}{}", PREFIX, label, message).style(style).to_string(),
    }
}
