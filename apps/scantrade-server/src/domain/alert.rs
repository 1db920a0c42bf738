//! Alert message formatting.
//!
//! Builds the chat-webhook payload (`username`, `avatar_url`, one embed) for
//! a signal. Delivery is an infrastructure concern.

use serde::{Deserialize, Serialize};

use super::signal::{SHEET_SOURCE, Signal};

/// Embed color for actions containing "BUY".
pub const BUY_COLOR: u32 = 5_763_719;

/// Embed color for every other action.
pub const SELL_COLOR: u32 = 15_548_997;

/// Embed color for webhook test messages.
pub const TEST_COLOR: u32 = 3_447_003;

/// Sender identity shown in the chat channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertIdentity {
    /// Display name.
    pub username: String,
    /// Icon URL.
    pub avatar_url: String,
}

impl Default for AlertIdentity {
    fn default() -> Self {
        Self {
            username: "ScanTrade Connector".to_string(),
            avatar_url: "https://scantrade.vercel.app/icon.svg".to_string(),
        }
    }
}

/// Webhook message body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    /// Display name.
    pub username: String,
    /// Icon URL.
    pub avatar_url: String,
    /// Rich embeds (always exactly one here).
    pub embeds: Vec<AlertEmbed>,
}

/// A single rich embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertEmbed {
    /// Embed title.
    pub title: String,
    /// Markdown body.
    pub description: String,
    /// Decimal RGB color.
    pub color: u32,
    /// Footer line.
    pub footer: AlertFooter,
}

/// Embed footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertFooter {
    /// Footer text.
    pub text: String,
}

/// Pick the embed color for an action string.
#[must_use]
pub fn color_for_action(action: &str) -> u32 {
    if action.to_uppercase().contains("BUY") {
        BUY_COLOR
    } else {
        SELL_COLOR
    }
}

impl AlertPayload {
    /// Payload announcing a signal.
    ///
    /// `local_time` is the human-readable time shown in the footer.
    #[must_use]
    pub fn for_signal(identity: &AlertIdentity, signal: &Signal, local_time: &str) -> Self {
        Self {
            username: identity.username.clone(),
            avatar_url: identity.avatar_url.clone(),
            embeds: vec![AlertEmbed {
                title: format!("🚨 Signal Detected: {}", signal.symbol),
                description: format!(
                    "**Action**: {}\n**Price**: {}",
                    signal.action, signal.price
                ),
                color: color_for_action(&signal.action),
                footer: AlertFooter {
                    text: format!("Source: {SHEET_SOURCE} • {local_time}"),
                },
            }],
        }
    }

    /// Payload used to check that a webhook accepts messages.
    #[must_use]
    pub fn for_test(identity: &AlertIdentity, name: &str, local_time: &str) -> Self {
        Self {
            username: identity.username.clone(),
            avatar_url: identity.avatar_url.clone(),
            embeds: vec![AlertEmbed {
                title: format!("🧪 Test Alert: {name}"),
                description: "Webhook connected. Signals from ScanTrade will appear here."
                    .to_string(),
                color: TEST_COLOR,
                footer: AlertFooter {
                    text: format!("ScanTrade • {local_time}"),
                },
            }],
        }
    }
}

/// Local wall-clock time formatted for embed footers, e.g. `3:04:05 PM`.
#[must_use]
pub fn local_time_label() -> String {
    chrono::Local::now().format("%-I:%M:%S %p").to_string()
}
