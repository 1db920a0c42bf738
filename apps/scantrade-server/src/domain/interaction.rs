//! Discord interaction payload types.
//!
//! Only the envelope `type` is interpreted; command handling is not wired.

use serde::{Deserialize, Serialize};

/// Interaction type code for a PING.
pub const PING: u8 = 1;

/// Response type code for a PONG.
pub const PONG: u8 = 1;

/// Minimal view of an inbound interaction.
#[derive(Debug, Clone, Deserialize)]
pub struct Interaction {
    /// Interaction type code.
    #[serde(rename = "type")]
    pub kind: u8,
}

impl Interaction {
    /// Whether this is a PING health check from Discord.
    #[must_use]
    pub const fn is_ping(&self) -> bool {
        self.kind == PING
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionResponse {
    /// Response type code.
    #[serde(rename = "type")]
    pub kind: u8,
}

impl InteractionResponse {
    /// Acknowledge a PING.
    #[must_use]
    pub const fn pong() -> Self {
        Self { kind: PONG }
    }
}
