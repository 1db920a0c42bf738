//! Spreadsheet export adapters.

mod google;

pub use google::GoogleSheetSource;
