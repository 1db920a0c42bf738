//! Spreadsheet export settings.

use serde::{Deserialize, Serialize};

use crate::domain::signal::DEFAULT_MAX_SIGNALS;

/// Largest accepted `max_signals`.
pub const MAX_SIGNALS_LIMIT: usize = 50;

/// Sheet source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Export host, without trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Fetch timeout in seconds.
    #[serde(default = "super::default_timeout_secs")]
    pub timeout_secs: u64,
    /// How many trailing qualifying rows a scan keeps.
    #[serde(default = "default_max_signals")]
    pub max_signals: usize,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: super::default_timeout_secs(),
            max_signals: default_max_signals(),
        }
    }
}

fn default_base_url() -> String {
    "https://docs.google.com".to_string()
}

const fn default_max_signals() -> usize {
    DEFAULT_MAX_SIGNALS
}
