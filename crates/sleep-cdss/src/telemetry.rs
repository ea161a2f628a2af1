use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(
                    f,
                    "invalid log level/filter '{}': unable to build EnvFilter",
                    value
                )
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

const TRIAGE_TARGETS: [&str; 2] = ["sleep_cdss", "sleep_cdss_api"];

/// Expand a bare level so it applies to the triage crates only; dependencies stay at `warn`.
/// Anything carrying its own directives is passed through untouched.
fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = vec!["warn".to_string()];
    directives.extend(TRIAGE_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Install the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives).map_err(|source| TelemetryError::EnvFilter {
                value: directives,
                source,
            })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_scopes_to_triage_crates() {
        assert_eq!(
            filter_directives("debug"),
            "warn,sleep_cdss=debug,sleep_cdss_api=debug"
        );
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(
            filter_directives("sleep_cdss::workflows=trace"),
            "sleep_cdss::workflows=trace"
        );
        assert_eq!(filter_directives("info,hyper=debug"), "info,hyper=debug");
    }

    #[test]
    fn rejects_unparseable_log_filter() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = TelemetryConfig {
            log_level: "sleep_cdss=verbose".to_string(),
        };
        let err = init(&config).expect_err("invalid filter rejected");
        assert!(matches!(err, TelemetryError::EnvFilter { .. }));
        assert!(err.to_string().contains("sleep_cdss=verbose"));
    }
}
