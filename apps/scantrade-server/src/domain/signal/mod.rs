//! Signal bounded context.
//!
//! A signal is a normalized trade alert derived from one spreadsheet row.
//! Signals are request-scoped: they are produced by [`parse_signals`], shown
//! to the caller, optionally dispatched, and then dropped.

mod parser;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

pub use parser::{DEFAULT_MAX_SIGNALS, ParseError, parse_signals};

/// Source label attached to every signal read from a sheet export.
pub const SHEET_SOURCE: &str = "Google Sheet";

/// Price label used when the price column is blank.
pub const MARKET_PRICE: &str = "Market";

/// A normalized trade alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Ticker or pair from column A.
    pub symbol: String,
    /// Action from column B (e.g. BUY, SELL, ALERT).
    pub action: String,
    /// Price from column C, or [`MARKET_PRICE`].
    pub price: String,
    /// ISO-8601 instant at which the row was parsed.
    pub timestamp: String,
    /// Where the signal came from.
    pub source: String,
}

impl Signal {
    /// Build a signal from already-cleaned cells.
    ///
    /// Returns `None` when `symbol` or `action` is empty.
    #[must_use]
    pub fn from_cells(
        symbol: &str,
        action: &str,
        price: Option<&str>,
        parsed_at: DateTime<Utc>,
    ) -> Option<Self> {
        if symbol.is_empty() || action.is_empty() {
            return None;
        }

        let price = match price {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => MARKET_PRICE.to_string(),
        };

        Some(Self {
            symbol: symbol.to_string(),
            action: action.to_string(),
            price,
            timestamp: parsed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            source: SHEET_SOURCE.to_string(),
        })
    }

    /// Whether the action reads as a buy (case-insensitive substring test).
    #[must_use]
    pub fn is_buy(&self) -> bool {
        self.action.to_uppercase().contains("BUY")
    }
}

/// Reorder parsed signals so the newest comes first.
///
/// Parse order is oldest-first; the API contract is newest-first.
#[must_use]
pub fn newest_first(mut signals: Vec<Signal>) -> Vec<Signal> {
    signals.reverse();
    signals
}
