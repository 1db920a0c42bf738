//! Alert Dispatcher Port (Driven Port)
//!
//! Interface for posting a message payload to a chat webhook.

use async_trait::async_trait;

use crate::domain::alert::AlertPayload;

/// Webhook delivery error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DispatchError {
    /// The webhook answered with a non-2xx status.
    #[error("Webhook rejected the message with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },

    /// The request never produced a response.
    #[error("Webhook request failed: {message}")]
    Network {
        /// Transport error details.
        message: String,
    },
}

/// Port for delivering alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertDispatcher: Send + Sync {
    /// POST `payload` as JSON to `webhook_url`.
    async fn dispatch(&self, webhook_url: &str, payload: &AlertPayload)
    -> Result<(), DispatchError>;
}
