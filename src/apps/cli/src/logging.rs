//! Logging Configuration
//!
//! Diagnostic logs go to stderr so they never interleave with the prompt on
//! stdout. Core crates log through `log`; the subscriber bridges those records.

use tracing_subscriber::EnvFilter;

pub const LOG_LEVEL_ENV: &str = "MMO_BOT_LOG_LEVEL";

const DEFAULT_LEVEL: log::LevelFilter = log::LevelFilter::Warn;

pub fn parse_log_level(value: &str) -> Option<log::LevelFilter> {
    match value.trim().to_lowercase().as_str() {
        "trace" => Some(log::LevelFilter::Trace),
        "debug" => Some(log::LevelFilter::Debug),
        "info" => Some(log::LevelFilter::Info),
        "warn" => Some(log::LevelFilter::Warn),
        "error" => Some(log::LevelFilter::Error),
        "off" => Some(log::LevelFilter::Off),
        _ => None,
    }
}

pub fn level_to_str(level: log::LevelFilter) -> &'static str {
    match level {
        log::LevelFilter::Trace => "trace",
        log::LevelFilter::Debug => "debug",
        log::LevelFilter::Info => "info",
        log::LevelFilter::Warn => "warn",
        log::LevelFilter::Error => "error",
        log::LevelFilter::Off => "off",
    }
}

pub fn resolve_default_level(raw: Option<String>) -> log::LevelFilter {
    match raw {
        Some(val) => parse_log_level(&val).unwrap_or_else(|| {
            eprintln!(
                "Warning: Invalid {} '{}', falling back to default",
                LOG_LEVEL_ENV, val
            );
            DEFAULT_LEVEL
        }),
        None => DEFAULT_LEVEL,
    }
}

pub fn init_logging() {
    let level = resolve_default_level(std::env::var(LOG_LEVEL_ENV).ok());
    let filter = EnvFilter::try_new(level_to_str(level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    if let Err(e) = result {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_levels_case_insensitively() {
        assert_eq!(parse_log_level("DEBUG"), Some(log::LevelFilter::Debug));
        assert_eq!(parse_log_level(" off "), Some(log::LevelFilter::Off));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn invalid_or_missing_level_falls_back_to_warn() {
        assert_eq!(resolve_default_level(None), log::LevelFilter::Warn);
        assert_eq!(
            resolve_default_level(Some("loud".to_string())),
            log::LevelFilter::Warn
        );
        assert_eq!(
            resolve_default_level(Some("trace".to_string())),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn level_names_round_trip() {
        for level in [
            log::LevelFilter::Trace,
            log::LevelFilter::Debug,
            log::LevelFilter::Info,
            log::LevelFilter::Warn,
            log::LevelFilter::Error,
            log::LevelFilter::Off,
        ] {
            assert_eq!(parse_log_level(level_to_str(level)), Some(level));
        }
    }
}
