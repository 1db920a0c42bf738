//! Sheet export parser.
//!
//! Turns the CSV rendering of a sheet into at most `max_signals` signals.
//! Row 0 is always treated as a header. The window is the last
//! `max_signals` rows whose tokenized column A and column B are non-empty.
//! Cells are then quote-stripped and trimmed, and a windowed row yields a
//! signal only if both cells are still non-empty. A whitespace-only row
//! therefore occupies a slot without producing a signal. Column C is
//! optional. Output keeps sheet order (oldest first).

use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord};

use super::Signal;

/// Number of trailing rows kept by default.
pub const DEFAULT_MAX_SIGNALS: usize = 5;

/// Errors from tokenizing a sheet export.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The export could not be tokenized (e.g. invalid UTF-8).
    #[error("Malformed sheet export near line {line}: {message}")]
    Malformed {
        /// 1-based line where tokenizing stopped.
        line: u64,
        /// Tokenizer message.
        message: String,
    },
}

/// Parse a CSV export into signals, oldest first.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] if the CSV tokenizer rejects the input.
pub fn parse_signals(
    csv_text: &str,
    max_signals: usize,
    parsed_at: DateTime<Utc>,
) -> Result<Vec<Signal>, ParseError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut present = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ParseError::Malformed {
            line: e.position().map_or(0, csv::Position::line),
            message: e.to_string(),
        })?;

        if has_symbol_and_action(&record) {
            present.push(record);
        }
    }

    let skip = present.len().saturating_sub(max_signals);
    Ok(present
        .iter()
        .skip(skip)
        .filter_map(|record| signal_from_record(record, parsed_at))
        .collect())
}

/// Raw presence test on columns A and B, before any cleaning.
fn has_symbol_and_action(record: &StringRecord) -> bool {
    matches!((record.get(0), record.get(1)), (Some(a), Some(b)) if !a.is_empty() && !b.is_empty())
}

fn signal_from_record(record: &StringRecord, parsed_at: DateTime<Utc>) -> Option<Signal> {
    let symbol = clean_cell(record.get(0)?);
    let action = clean_cell(record.get(1)?);
    let price = record.get(2).map(clean_cell);

    Signal::from_cells(&symbol, &action, price.as_deref(), parsed_at)
}

/// Strip every `"` and surrounding whitespace.
fn clean_cell(raw: &str) -> String {
    raw.replace('"', "").trim().to_string()
}
