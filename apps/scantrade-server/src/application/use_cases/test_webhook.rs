//! Test Webhook Use Case

use std::sync::Arc;

use crate::application::ports::{
    AlertDispatcher, DispatchError, WebhookStore, WebhookStoreError,
};
use crate::domain::alert::{AlertIdentity, AlertPayload, local_time_label};
use crate::domain::webhook::{DEFAULT_WEBHOOK_NAME, WebhookEntry, WebhookValidationError};
use crate::error::{ApiError, ErrorKind};

/// Webhook test failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TestWebhookError {
    /// Name or URL rejected before sending.
    #[error(transparent)]
    Invalid(#[from] WebhookValidationError),

    /// The webhook did not accept the test message.
    #[error("Test alert failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The verified webhook could not be saved.
    #[error(transparent)]
    Store(#[from] WebhookStoreError),
}

impl TestWebhookError {
    /// Error classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Invalid(_) => ErrorKind::Validation,
            Self::Dispatch(_) => ErrorKind::Upstream,
            Self::Store(_) => ErrorKind::Internal,
        }
    }
}

impl From<TestWebhookError> for ApiError {
    fn from(err: TestWebhookError) -> Self {
        Self::new(err.kind(), err.to_string())
    }
}

/// Sends a test embed and, if it is accepted, saves the webhook.
pub struct TestWebhookUseCase {
    dispatcher: Arc<dyn AlertDispatcher>,
    webhooks: Arc<dyn WebhookStore>,
    identity: AlertIdentity,
}

impl TestWebhookUseCase {
    /// Create a new `TestWebhookUseCase`.
    pub fn new(
        dispatcher: Arc<dyn AlertDispatcher>,
        webhooks: Arc<dyn WebhookStore>,
        identity: AlertIdentity,
    ) -> Self {
        Self {
            dispatcher,
            webhooks,
            identity,
        }
    }

    /// Send the test alert to `webhook_url` and save it under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`TestWebhookError`] if the input is invalid, delivery fails,
    /// or the store rejects the write.
    pub async fn execute(
        &self,
        webhook_url: &str,
        name: Option<&str>,
    ) -> Result<WebhookEntry, TestWebhookError> {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(DEFAULT_WEBHOOK_NAME);
        let entry = WebhookEntry::new(name, webhook_url)?;

        let payload = AlertPayload::for_test(&self.identity, &entry.name, &local_time_label());
        self.dispatcher.dispatch(&entry.url, &payload).await?;

        self.webhooks.save(entry.clone()).await?;
        tracing::info!(name = %entry.name, "Webhook verified and saved");

        Ok(entry)
    }
}
