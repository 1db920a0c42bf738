//! Discord webhook and interaction settings.

use serde::{Deserialize, Serialize};

use crate::domain::alert::AlertIdentity;

/// Discord configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscordConfig {
    /// Application public key (hex) for interaction signatures.
    /// Interactions are rejected while unset.
    #[serde(default)]
    pub public_key: Option<String>,
    /// Display name on alert messages.
    #[serde(default = "default_username")]
    pub username: String,
    /// Avatar on alert messages.
    #[serde(default = "default_avatar_url")]
    pub avatar_url: String,
    /// Webhook POST timeout in seconds.
    #[serde(default = "super::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            public_key: None,
            username: default_username(),
            avatar_url: default_avatar_url(),
            timeout_secs: super::default_timeout_secs(),
        }
    }
}

impl DiscordConfig {
    /// Public key, treating an empty string as unset.
    #[must_use]
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref().filter(|k| !k.is_empty())
    }

    /// Sender identity for alert payloads.
    #[must_use]
    pub fn identity(&self) -> AlertIdentity {
        AlertIdentity {
            username: self.username.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

fn default_username() -> String {
    AlertIdentity::default().username
}

fn default_avatar_url() -> String {
    AlertIdentity::default().avatar_url
}
