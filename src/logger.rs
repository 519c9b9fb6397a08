use std::str::FromStr;
use std::time::SystemTime;

use anyhow::Result;
use colored::{ColoredString, Colorize};
use log::{Level, LevelFilter};

fn paint_level(level: Level) -> ColoredString {
    let name = level.to_string();
    match level {
        Level::Error => name.red().bold(),
        Level::Warn => name.yellow(),
        Level::Info => name.green(),
        Level::Debug => name.blue(),
        Level::Trace => name.dimmed(),
    }
}

pub fn setup_logger(level: &str) -> Result<()> {
    let level_filter = LevelFilter::from_str(level).unwrap_or(LevelFilter::Info);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                paint_level(record.level()),
                record.target(),
                message
            ))
        })
        .level(level_filter)
        // reqwest/hyper are chatty at debug
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stdout())
        .apply()?;

    Ok(())
}
