//! Logging setup.
//!
//! `RUST_LOG` wins when set; otherwise the configured level applies to this
//! crate and `warn` to everything else.

use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingConfig};

/// Logging initialization failure.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// Level string is not a valid filter directive.
    #[error("invalid log level '{level}': {message}")]
    InvalidLevel {
        /// Configured level.
        level: String,
        /// Parser message.
        message: String,
    },

    /// A global subscriber is already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Build the filter for `config`, honoring `RUST_LOG` when present.
///
/// # Errors
///
/// Returns [`LoggingError::InvalidLevel`] if the configured level does not parse.
pub fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let directives = format!("warn,scantrade_server={}", config.level);
    EnvFilter::try_new(&directives).map_err(|e| LoggingError::InvalidLevel {
        level: config.level.clone(),
        message: e.to_string(),
    })
}

/// Install the global subscriber in the configured format.
///
/// # Errors
///
/// Returns [`LoggingError`] if the level is invalid or a subscriber is
/// already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = build_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().with_current_span(false).try_init(),
    };

    result.map_err(|e| LoggingError::Install(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_level_is_rejected() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let config = LoggingConfig {
            level: "loud=[".to_string(),
            format: LogFormat::Json,
        };
        assert!(matches!(
            build_filter(&config),
            Err(LoggingError::InvalidLevel { .. })
        ));
    }

    #[test]
    fn default_level_builds() {
        assert!(build_filter(&LoggingConfig::default()).is_ok());
    }
}
