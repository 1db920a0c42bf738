//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{
    AlertDispatcher, ChatModel, SessionProvider, SettingsStore, SheetSource, SignatureVerifier,
    WebhookStore,
};
use crate::application::use_cases::{
    HandleInteractionUseCase, RelayChatUseCase, ScanSheetUseCase, TestWebhookUseCase,
};
use crate::config::Config;
use crate::infrastructure::auth::StaticTokenSessions;
use crate::infrastructure::discord::{DiscordWebhookDispatcher, Ed25519Verifier};
use crate::infrastructure::gemini::GeminiChatAdapter;
use crate::infrastructure::http::AppState;
use crate::infrastructure::persistence::{
    InMemorySettingsStore, InMemoryWebhookStore, JsonFileWebhookStore,
};
use crate::infrastructure::sheets::GoogleSheetSource;

/// Adapter construction failure.
#[derive(Debug, thiserror::Error)]
#[error("Failed to build {component}: {message}")]
pub struct ContainerError {
    /// Component that failed.
    pub component: &'static str,
    /// Underlying error.
    pub message: String,
}

impl ContainerError {
    fn new(component: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            component,
            message: err.to_string(),
        }
    }
}

/// Dependency injection container.
///
/// Holds every wired port. [`Container::from_config`] builds the production
/// adapters; [`Container::new`] accepts any implementations.
#[derive(Clone)]
pub struct Container {
    config: Config,
    sheets: Arc<dyn SheetSource>,
    dispatcher: Arc<dyn AlertDispatcher>,
    webhooks: Arc<dyn WebhookStore>,
    settings: Arc<dyn SettingsStore>,
    sessions: Arc<dyn SessionProvider>,
    chat_model: Arc<dyn ChatModel>,
    verifier: Option<Arc<dyn SignatureVerifier>>,
}

impl Container {
    /// Create a container from explicit ports.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: Config,
        sheets: Arc<dyn SheetSource>,
        dispatcher: Arc<dyn AlertDispatcher>,
        webhooks: Arc<dyn WebhookStore>,
        settings: Arc<dyn SettingsStore>,
        sessions: Arc<dyn SessionProvider>,
        chat_model: Arc<dyn ChatModel>,
        verifier: Option<Arc<dyn SignatureVerifier>>,
    ) -> Self {
        Self {
            config,
            sheets,
            dispatcher,
            webhooks,
            settings,
            sessions,
            chat_model,
            verifier,
        }
    }

    /// Build the production adapters described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError`] if an HTTP client cannot be built, the
    /// public key is invalid, or the webhook file cannot be opened.
    pub async fn from_config(config: Config) -> Result<Self, ContainerError> {
        let sheets = GoogleSheetSource::new(&config.sheets)
            .map_err(|e| ContainerError::new("sheet source", e))?;
        let dispatcher = DiscordWebhookDispatcher::new(&config.discord)
            .map_err(|e| ContainerError::new("webhook dispatcher", e))?;
        let chat_model = GeminiChatAdapter::new(&config.chat)
            .map_err(|e| ContainerError::new("chat model", e))?;

        let webhooks: Arc<dyn WebhookStore> = match &config.storage.webhooks_path {
            Some(path) => Arc::new(
                JsonFileWebhookStore::open(path)
                    .await
                    .map_err(|e| ContainerError::new("webhook store", e))?,
            ),
            None => Arc::new(InMemoryWebhookStore::new()),
        };

        let verifier: Option<Arc<dyn SignatureVerifier>> = match config.discord.public_key() {
            Some(key) => Some(Arc::new(
                Ed25519Verifier::from_hex(key)
                    .map_err(|e| ContainerError::new("signature verifier", e))?,
            )),
            None => {
                tracing::warn!("discord.public_key not set, interactions will be rejected");
                None
            }
        };

        let sessions = StaticTokenSessions::new(&config.auth.sessions);
        if sessions.is_empty() {
            tracing::warn!("auth.sessions is empty, protected routes will answer 401");
        }

        Ok(Self::new(
            config,
            Arc::new(sheets),
            Arc::new(dispatcher),
            webhooks,
            Arc::new(InMemorySettingsStore::new()),
            Arc::new(sessions),
            Arc::new(chat_model),
            verifier,
        ))
    }

    /// Loaded configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Get the webhook store.
    #[must_use]
    pub fn webhooks(&self) -> Arc<dyn WebhookStore> {
        Arc::clone(&self.webhooks)
    }

    /// Create a `ScanSheetUseCase`.
    #[must_use]
    pub fn scan_sheet_use_case(&self) -> ScanSheetUseCase {
        ScanSheetUseCase::new(
            Arc::clone(&self.sheets),
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.webhooks),
            self.config.discord.identity(),
            self.config.sheets.max_signals,
        )
    }

    /// Create a `TestWebhookUseCase`.
    #[must_use]
    pub fn test_webhook_use_case(&self) -> TestWebhookUseCase {
        TestWebhookUseCase::new(
            Arc::clone(&self.dispatcher),
            Arc::clone(&self.webhooks),
            self.config.discord.identity(),
        )
    }

    /// Create a `RelayChatUseCase`.
    #[must_use]
    pub fn relay_chat_use_case(&self) -> RelayChatUseCase {
        RelayChatUseCase::new(Arc::clone(&self.chat_model), self.config.chat.api_key.clone())
    }

    /// Create a `HandleInteractionUseCase`.
    #[must_use]
    pub fn handle_interaction_use_case(&self) -> HandleInteractionUseCase {
        HandleInteractionUseCase::new(self.verifier.clone())
    }

    /// Wire the HTTP state.
    #[must_use]
    pub fn app_state(&self, version: impl Into<String>) -> AppState {
        AppState {
            scan: Arc::new(self.scan_sheet_use_case()),
            test_webhook: Arc::new(self.test_webhook_use_case()),
            chat: Arc::new(self.relay_chat_use_case()),
            interactions: Arc::new(self.handle_interaction_use_case()),
            webhooks: Arc::clone(&self.webhooks),
            settings: Arc::clone(&self.settings),
            sessions: Arc::clone(&self.sessions),
            risk_limits: self.config.governance.limits(),
            version: version.into(),
        }
    }
}
