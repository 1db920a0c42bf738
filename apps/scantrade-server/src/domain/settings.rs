//! Per-user dashboard preferences.

use serde::{Deserialize, Serialize};

/// Dashboard preferences saved per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    /// UI theme name.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Whether toasts and alerts are enabled.
    #[serde(default = "default_notifications")]
    pub notifications: bool,
    /// Pairs pinned on the dashboard.
    #[serde(default = "default_assets")]
    pub preferred_assets: Vec<String>,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            notifications: default_notifications(),
            preferred_assets: default_assets(),
        }
    }
}

fn default_theme() -> String {
    "dark".to_string()
}

const fn default_notifications() -> bool {
    true
}

fn default_assets() -> Vec<String> {
    vec!["BTC/USDT".to_string(), "ETH/USDT".to_string()]
}
