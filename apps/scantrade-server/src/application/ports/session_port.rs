//! Session Provider Port (Driven Port)
//!
//! Answers "is there a valid session for this bearer token, and who is it".

use async_trait::async_trait;

use crate::domain::session::Session;

/// Session lookup error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// The identity backend could not be consulted.
    #[error("Session backend unavailable: {message}")]
    Unavailable {
        /// Error details.
        message: String,
    },
}

/// Port for resolving sessions.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Resolve a bearer token. `Ok(None)` means no valid session.
    async fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError>;
}
