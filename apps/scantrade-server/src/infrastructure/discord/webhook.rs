//! Discord webhook adapter implementing `AlertDispatcher`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::application::ports::{AlertDispatcher, DispatchError};
use crate::config::DiscordConfig;
use crate::domain::alert::AlertPayload;

/// Posts alert payloads as JSON to a webhook URL.
#[derive(Debug, Clone)]
pub struct DiscordWebhookDispatcher {
    client: Client,
}

impl DiscordWebhookDispatcher {
    /// Create a new dispatcher from config.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &DiscordConfig) -> Result<Self, DispatchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DispatchError::Network {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl AlertDispatcher for DiscordWebhookDispatcher {
    async fn dispatch(
        &self,
        webhook_url: &str,
        payload: &AlertPayload,
    ) -> Result<(), DispatchError> {
        let response = self
            .client
            .post(webhook_url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DispatchError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DispatchError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
