//! Sheet Source Port (Driven Port)
//!
//! Interface for retrieving the CSV export of a spreadsheet.

use async_trait::async_trait;

/// Remediation hint appended to every fetch failure.
pub const PUBLISH_HINT: &str = "Make sure the sheet is \"Published to Web\" or Public.";

/// Sheet fetch error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SheetError {
    /// The export service answered with a non-2xx status.
    #[error("Failed to fetch sheet. Status: {status}. {PUBLISH_HINT}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("Failed to fetch sheet: {message}. {PUBLISH_HINT}")]
    Network {
        /// Transport error details.
        message: String,
    },
}

impl SheetError {
    /// HTTP status, if the export service answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status } => Some(*status),
            Self::Network { .. } => None,
        }
    }
}

/// Port for fetching a sheet export.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetch the raw CSV text for `sheet_id`.
    async fn fetch_csv(&self, sheet_id: &str) -> Result<String, SheetError>;
}
