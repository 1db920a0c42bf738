//! Google Sheets CSV export adapter implementing `SheetSource`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{SheetError, SheetSource};
use crate::config::SheetsConfig;

/// Fetches `{base_url}/spreadsheets/d/{id}/export?format=csv`.
#[derive(Debug, Clone)]
pub struct GoogleSheetSource {
    client: Client,
    base_url: String,
}

impl GoogleSheetSource {
    /// Create a new adapter from config.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &SheetsConfig) -> Result<Self, SheetError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SheetError::Network {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Export URL for a sheet. The id is percent-encoded as a path segment.
    #[must_use]
    pub fn export_url(&self, sheet_id: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(sheet_id.as_bytes()).collect();
        format!(
            "{}/spreadsheets/d/{}/export?format=csv",
            self.base_url,
            encoded.replace('+', "%20")
        )
    }
}

#[async_trait]
impl SheetSource for GoogleSheetSource {
    async fn fetch_csv(&self, sheet_id: &str) -> Result<String, SheetError> {
        let url = self.export_url(sheet_id);
        tracing::info!(url = %url, "Fetching sheet export");

        let response = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(sheet_id = %sheet_id, error = %e, "Sheet fetch failed");
            SheetError::Network {
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(sheet_id = %sheet_id, status = status.as_u16(), "Sheet fetch rejected");
            return Err(SheetError::Status {
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| SheetError::Network {
            message: e.to_string(),
        })
    }
}
