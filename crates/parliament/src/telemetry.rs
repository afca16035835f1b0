use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    Filter { directives: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::Filter { directives, .. } => {
                write!(f, "log filter '{directives}' is not a valid tracing directive")
            }
            TelemetryError::Subscriber(err) => {
                write!(f, "a global subscriber could not be installed: {err}")
            }
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::Filter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Filter directives in effect: a non-blank `RUST_LOG` wins over the
/// configured level. A malformed `RUST_LOG` is ignored, a malformed
/// configured level is an error.
pub fn log_filter(
    config: &TelemetryConfig,
    rust_log: Option<&str>,
) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log
        .map(str::trim)
        .filter(|directives| !directives.is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
    {
        return Ok(filter);
    }

    EnvFilter::try_new(config.log_level.trim()).map_err(|source| TelemetryError::Filter {
        directives: config.log_level.clone(),
        source,
    })
}

/// Install the global subscriber. Output goes to stderr so command output on
/// stdout stays machine readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = log_filter(config, rust_log.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::LevelFilter;

    fn config(log_level: &str) -> TelemetryConfig {
        TelemetryConfig {
            log_level: log_level.to_string(),
        }
    }

    #[test]
    fn rust_log_overrides_configured_level() {
        let filter = log_filter(&config("info"), Some("parliament=debug")).expect("filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn blank_or_malformed_rust_log_falls_back_to_config() {
        let filter = log_filter(&config("warn"), Some("  ")).expect("filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = log_filter(&config("warn"), Some("parliament=loud")).expect("filter");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn malformed_configured_level_is_reported() {
        let error = log_filter(&config("info,parliament=loud"), None).expect_err("bad directive");
        assert!(matches!(
            error,
            TelemetryError::Filter { ref directives, .. } if directives == "info,parliament=loud"
        ));
        assert!(error.to_string().contains("info,parliament=loud"));
    }
}
