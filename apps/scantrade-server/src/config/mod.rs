//! Configuration module for the ScanTrade server.
//!
//! YAML loading, validation, and environment variable interpolation for
//! every adapter the server wires at startup.
//!
//! # Usage
//!
//! ```rust,ignore
//! use scantrade_server::config::load_config;
//!
//! // SCANTRADE_CONFIG, then config.yaml, then built-in defaults
//! let config = load_config(None)?;
//!
//! // Explicit path
//! let config = load_config(Some("deploy/config.yaml"))?;
//!
//! println!("HTTP port: {}", config.server.http_port);
//! ```

mod auth;
mod chat;
mod discord;
mod governance;
mod observability;
mod server;
mod sheets;
mod storage;

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub use auth::{AuthConfig, SessionEntry};
pub use chat::ChatConfig;
pub use discord::DiscordConfig;
pub use governance::GovernanceConfig;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};
pub use server::ServerConfig;
pub use sheets::{MAX_SIGNALS_LIMIT, SheetsConfig};
pub use storage::StorageConfig;

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SCANTRADE_CONFIG";

/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Configuration used when no file exists. Secrets still come from the
/// environment.
pub const DEFAULT_CONFIG_YAML: &str = r"
server:
  http_port: ${PORT:-3000}
discord:
  public_key: '${DISCORD_PUBLIC_KEY:-}'
chat:
  api_key: '${GEMINI_API_KEY:-}'
";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// Configuration validation failed.
    #[error("Config validation failed: {0}")]
    ValidationError(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server.
    #[serde(default)]
    pub server: ServerConfig,
    /// Spreadsheet export source.
    #[serde(default)]
    pub sheets: SheetsConfig,
    /// Discord webhook and interactions.
    #[serde(default)]
    pub discord: DiscordConfig,
    /// Chat model proxy.
    #[serde(default)]
    pub chat: ChatConfig,
    /// Bearer-token sessions.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Webhook persistence.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Risk limits shown on the dashboard.
    #[serde(default)]
    pub governance: GovernanceConfig,
    /// Logging.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

pub(crate) const fn default_timeout_secs() -> u64 {
    10
}

// ============================================
// Configuration Loading
// ============================================

/// Load configuration from a YAML file with environment variable interpolation.
///
/// The path is `path`, else `$SCANTRADE_CONFIG`, else `config.yaml`. When
/// that file does not exist, [`DEFAULT_CONFIG_YAML`] is used.
///
/// # Errors
///
/// Returns a `ConfigError` if the file cannot be read, parsed, or validated.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.map_or_else(
        || std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string()),
        str::to_string,
    );

    if !Path::new(&path).exists() {
        tracing::info!(path = %path, "Config file not found, using built-in defaults");
        return load_config_from_string(DEFAULT_CONFIG_YAML);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;

    load_config_from_string(&contents)
}

/// Load configuration from a YAML string (useful for testing).
///
/// # Errors
///
/// Returns a `ConfigError` if the YAML cannot be parsed or validated.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let interpolated = interpolate_env_vars(yaml);
    let config: Config = if interpolated.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml_bw::from_str(&interpolated)?
    };
    validate_config(&config)?;
    Ok(config)
}

/// Interpolate environment variables in a string.
///
/// Supports both `${VAR}` and `${VAR:-default}` syntax. Unset variables
/// without a default become the empty string.
#[allow(clippy::expect_used)] // Regex is compile-time constant
fn interpolate_env_vars(input: &str) -> String {
    use std::sync::OnceLock;

    static ENV_VAR_REGEX: OnceLock<regex::Regex> = OnceLock::new();

    let re = ENV_VAR_REGEX.get_or_init(|| {
        regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?::-([^}]*))?\}")
            .expect("env var regex is valid")
    });

    re.replace_all(input, |cap: &regex::Captures<'_>| {
        let default_value = cap.get(2).map_or("", |m| m.as_str());
        match std::env::var(&cap[1]) {
            Ok(v) if !v.is_empty() => v,
            _ => default_value.to_string(),
        }
    })
    .into_owned()
}

/// Validate configuration values.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let timeouts = [
        ("sheets.timeout_secs", config.sheets.timeout_secs),
        ("discord.timeout_secs", config.discord.timeout_secs),
        ("chat.timeout_secs", config.chat.timeout_secs),
    ];
    for (name, secs) in timeouts {
        if secs == 0 {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be positive"
            )));
        }
    }

    validate_base_url("sheets.base_url", &config.sheets.base_url)?;
    validate_base_url("chat.base_url", &config.chat.base_url)?;

    if !(1..=MAX_SIGNALS_LIMIT).contains(&config.sheets.max_signals) {
        return Err(ConfigError::ValidationError(format!(
            "sheets.max_signals must be between 1 and {MAX_SIGNALS_LIMIT}"
        )));
    }

    if let Some(key) = config.discord.public_key() {
        if key.len() != 64 || !key.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::ValidationError(
                "discord.public_key must be 64 hex characters".to_string(),
            ));
        }
    }

    for (name, pct) in config.governance.percentages() {
        if pct.is_nan() || pct <= 0.0 || pct > 100.0 {
            return Err(ConfigError::ValidationError(format!(
                "{name} must be in (0, 100]"
            )));
        }
    }

    let mut tokens = HashSet::new();
    for session in &config.auth.sessions {
        if session.token.is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.sessions token cannot be empty".to_string(),
            ));
        }
        if !tokens.insert(session.token.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "auth.sessions token for '{}' is duplicated",
                session.email
            )));
        }
    }

    Ok(())
}

fn validate_base_url(name: &str, raw: &str) -> Result<(), ConfigError> {
    match Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::ValidationError(format!(
            "{name} must be an http(s) URL"
        ))),
    }
}
