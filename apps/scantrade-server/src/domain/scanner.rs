//! Built-in market scanner catalogue.

use serde::Serialize;

/// A scanner and the condition it fires on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScannerDescriptor {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Human-readable trigger condition.
    pub condition: &'static str,
}

/// Every scanner, in display order.
pub static SCANNERS: [ScannerDescriptor; 5] = [
    ScannerDescriptor {
        id: "trend_alignment",
        name: "Trend Alignment Scanner",
        condition: "EMA 20 > EMA 50 > EMA 200",
    },
    ScannerDescriptor {
        id: "volatility_compression",
        name: "Volatility Compression",
        condition: "BB Squeeze detected",
    },
    ScannerDescriptor {
        id: "momentum_divergence",
        name: "Momentum Divergence",
        condition: "RSI < 30 & MACD Bullish",
    },
    ScannerDescriptor {
        id: "support_resistance",
        name: "Support/Resistance Break",
        condition: "Price crosses key level",
    },
    ScannerDescriptor {
        id: "volume_profile",
        name: "Volume Profile Analyst",
        condition: "POC crossing detected",
    },
];

/// Look a scanner up by id (exact match).
#[must_use]
pub fn find_scanner(id: &str) -> Option<&'static ScannerDescriptor> {
    SCANNERS.iter().find(|s| s.id == id)
}
