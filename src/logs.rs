//! Log level control
//!
//! The library only emits through the `log` facade. A binary installs the
//! backend with [`init_logging`]; the level can be changed at runtime.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::{DataError, DataResult};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl From<log::LevelFilter> for LogLevel {
    fn from(level: log::LevelFilter) -> Self {
        match level {
            log::LevelFilter::Error => LogLevel::Error,
            log::LevelFilter::Warn => LogLevel::Warn,
            log::LevelFilter::Info => LogLevel::Info,
            log::LevelFilter::Debug => LogLevel::Debug,
            log::LevelFilter::Trace => LogLevel::Trace,
            log::LevelFilter::Off => LogLevel::Off,
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

impl FromStr for LogLevel {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            "off" => Ok(LogLevel::Off),
            other => Err(DataError::Config(format!("Invalid log level: {}", other))),
        }
    }
}

/// Change the log level at runtime (not persisted)
pub fn set_log_level(level: &str) -> DataResult<()> {
    let level: LogLevel = level.parse()?;
    log::set_max_level(level.into());
    Ok(())
}

/// Current log level
pub fn get_log_level() -> LogLevel {
    log::max_level().into()
}

/// Filter and `log` level for the given `ALKEMY_LOG` directives.
///
/// Valid directives decide both; otherwise everything up to `fallback` is
/// shown.
fn resolve_filter(directives: Option<&str>, fallback: LogLevel) -> (EnvFilter, LogLevel) {
    if let Some(filter) = directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
    {
        let level = match filter.max_level_hint() {
            Some(hint) if hint == LevelFilter::OFF => LogLevel::Off,
            Some(hint) if hint == LevelFilter::ERROR => LogLevel::Error,
            Some(hint) if hint == LevelFilter::WARN => LogLevel::Warn,
            Some(hint) if hint == LevelFilter::INFO => LogLevel::Info,
            Some(hint) if hint == LevelFilter::DEBUG => LogLevel::Debug,
            _ => LogLevel::Trace,
        };
        return (filter, level);
    }
    let filter = EnvFilter::new(format!("{:?}", fallback).to_lowercase());
    (filter, fallback)
}

/// Install a `tracing-subscriber` formatter that also receives `log` records.
///
/// `RUST_LOG` style directives are read from `ALKEMY_LOG`; without them
/// everything up to `level` is shown. Calling it twice is harmless.
pub fn init_logging(level: LogLevel) {
    let directives = std::env::var(crate::config::ENV_LOG_LEVEL).ok();
    let (filter, max_level) = resolve_filter(directives.as_deref(), level);

    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        log::debug!("Logger already initialized");
    }
    log::set_max_level(max_level.into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_parse_case_insensitively() {
        assert_eq!("WARN".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!(" trace ".parse::<LogLevel>().unwrap(), LogLevel::Trace);
        assert!(matches!(
            "verbose".parse::<LogLevel>(),
            Err(DataError::Config(_))
        ));
    }

    #[test]
    fn set_then_get_round_trips() {
        set_log_level("info").unwrap();
        assert_eq!(get_log_level(), LogLevel::Info);
        assert!(set_log_level("loud").is_err());
        assert_eq!(get_log_level(), LogLevel::Info);
    }

    #[test]
    fn directives_override_the_default_level() {
        let (_, level) = resolve_filter(Some("debug"), LogLevel::Info);
        assert_eq!(level, LogLevel::Debug);

        let (_, level) = resolve_filter(Some("warn,alkemy_data=trace"), LogLevel::Info);
        assert_eq!(level, LogLevel::Trace);
    }

    #[test]
    fn missing_or_invalid_directives_use_the_default_level() {
        let (_, level) = resolve_filter(None, LogLevel::Info);
        assert_eq!(level, LogLevel::Info);

        let (_, level) = resolve_filter(Some("alkemy_data=loud"), LogLevel::Warn);
        assert_eq!(level, LogLevel::Warn);

        let (_, level) = resolve_filter(Some("  "), LogLevel::Error);
        assert_eq!(level, LogLevel::Error);
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&LogLevel::Debug).unwrap(), "\"debug\"");
    }
}
