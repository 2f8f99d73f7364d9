use std::env;

use chrono::Local;
use log::LevelFilter;

pub fn level_from_str(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        _ => LevelFilter::Warn,
    }
}

/// Logs to stderr. `LOG_LEVEL` wins over `fallback_level` (usually the config file value).
pub fn setup_logging(fallback_level: Option<&str>) -> Result<(), fern::InitError> {
    let level = match env::var("LOG_LEVEL") {
        Ok(level) => level_from_str(&level),
        Err(_) => fallback_level.map(level_from_str).unwrap_or(LevelFilter::Warn),
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level)
        // reqwest/hyper are noisy at debug
        .level_for("hyper", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}
