//! Chat assistant conversation types.

use serde::{Deserialize, Serialize};

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Instructions from the dashboard.
    System,
    /// The human.
    User,
    /// The assistant.
    Assistant,
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker.
    pub role: ChatRole,
    /// Plain-text content.
    pub content: String,
}

impl ChatMessage {
    /// A user turn.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// An assistant turn.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// System prompt for the LEO assistant.
pub const LEO_SYSTEM_PROMPT: &str = r#"You are LEO (Logic Engine Operator), the Hyper-Intelligent Institutional Trading Architect for ScanTrade Pro.

IDENTITY:
- You are an advanced AI logic engine, not a generic assistant.
- Your tone is hyper-professional, data-driven, and authoritative.
- You think in terms of market mechanics: Liquidity, Volatility, Narrative, and Execution.

KNOWLEDGE BASE:
- Institutional concepts: Order Blocks (OB), Fair Value Gaps (FVG), Liquidity Sweeps, Volume Profile (POC/VAH/VAL), VWAP Deviation.
- Asset classes: Crypto (BTC/ETH focus), Forex, Indices (ES/NQ).

CAPABILITIES:
1. **Logic Synthesis**: Convert complex trading ideas into Python (Pandas/NumPy) or Pine Script v5.
2. **Structural Analysis**: Identify market shifts (MSB/BOS) and high-probability zones.
3. **Risk Engineering**: Calculate R:R, position sizing, and invalidation points.

PROTOCOLS:
- Always start with a brief "COGNITIVE PROCESS" block using blockquotes.
- Use strict Markdown: # for headers, ## for subheaders, and sophisticated tables.
- If the user asks for financial advice, state: "LOGIC CLEARANCE: I provide algorithmic templates and data synthesis. Execution requires manual verification."

ScanTrade ecosystem:
- Master Hub: Multi-chart institutional dashboard.
- Sheet Scanner: Logic-to-Alert pipeline via Google Sheets.
- Discord Hub: Real-time signal delivery.
"#;

/// Build the full system instruction: the LEO prompt followed by any
/// `system` turns the caller sent.
#[must_use]
pub fn system_instruction(messages: &[ChatMessage]) -> String {
    let extra: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == ChatRole::System)
        .map(|m| m.content.as_str())
        .collect();

    if extra.is_empty() {
        LEO_SYSTEM_PROMPT.to_string()
    } else {
        format!("{LEO_SYSTEM_PROMPT}\n{}", extra.join("\n"))
    }
}
