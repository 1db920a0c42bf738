//! Webhook Store Port (Driven Port)
//!
//! Keyed store of saved webhooks (name -> URL).

use async_trait::async_trait;

use crate::domain::webhook::WebhookEntry;

/// Webhook store error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WebhookStoreError {
    /// Backing storage could not be read or written.
    #[error("Webhook storage I/O failed: {message}")]
    Io {
        /// Error details.
        message: String,
    },

    /// Stored data could not be (de)serialized.
    #[error("Webhook storage is corrupt: {message}")]
    Corrupt {
        /// Error details.
        message: String,
    },
}

/// Port for saved-webhook persistence.
#[async_trait]
pub trait WebhookStore: Send + Sync {
    /// All entries, sorted by name.
    async fn list(&self) -> Result<Vec<WebhookEntry>, WebhookStoreError>;

    /// Look up one entry by name.
    async fn get(&self, name: &str) -> Result<Option<WebhookEntry>, WebhookStoreError>;

    /// Insert or replace an entry.
    async fn save(&self, entry: WebhookEntry) -> Result<(), WebhookStoreError>;

    /// Remove an entry. Returns whether it existed.
    async fn remove(&self, name: &str) -> Result<bool, WebhookStoreError>;
}
