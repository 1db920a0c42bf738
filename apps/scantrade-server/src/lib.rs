// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! ScanTrade Server - Rust Core Library
//!
//! Turns a published Google Sheet into trading signals and pushes the newest
//! one to a Discord webhook, alongside the dashboard's supporting APIs.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure types and rules
//!   - `signal`: CSV export to normalized signals
//!   - `alert`: Embed payloads and color rules
//!   - `webhook`, `session`, `settings`, `chat`, `interaction`
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: `SheetSource`, `AlertDispatcher`, `WebhookStore`, `ChatModel`, ...
//!   - `use_cases`: `ScanSheet`, `TestWebhook`, `RelayChat`, `HandleInteraction`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `sheets`: Google Sheets CSV export
//!   - `discord`: Webhook dispatcher and Ed25519 verifier
//!   - `gemini`: Streaming chat model
//!   - `persistence`: In-memory and JSON-file stores
//!   - `auth`: Static bearer-token sessions
//!   - `http`: Axum router

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// YAML configuration loading and validation.
pub mod config;

/// Error taxonomy and HTTP error rendering.
pub mod error;

/// Logging setup.
pub mod observability;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::alert::{AlertIdentity, AlertPayload};
pub use domain::signal::{Signal, parse_signals};

pub use application::ports::{
    AlertDispatcher, ChatModel, SessionProvider, SettingsStore, SheetSource, SignatureVerifier,
    WebhookStore,
};
pub use application::use_cases::{
    HandleInteractionUseCase, RelayChatUseCase, ScanCommand, ScanOutcome, ScanSheetUseCase,
    TestWebhookUseCase,
};

pub use config::{Config, ConfigError, load_config};
pub use error::{ApiError, ErrorKind};

pub use infrastructure::config::{Container, ContainerError};
pub use infrastructure::http::{AppState, create_router};
