//! Error taxonomy for the HTTP API.
//!
//! Every failure that reaches a caller is classified by [`ErrorKind`], which
//! fixes the HTTP status and a stable reason string. Callers branch on the
//! kind, never on the message text.
//!
//! | Kind | Status | Usage |
//! |------|--------|-------|
//! | `Validation` | 400 | Missing or malformed caller input |
//! | `Auth` | 401 | Missing/invalid session or signature |
//! | `NotFound` | 404 | Named resource does not exist |
//! | `Fetch` | 500 | Sheet export unreachable or not public |
//! | `Parse` | 500 | Sheet export could not be tokenized |
//! | `Upstream` | 502 | Webhook test or other outbound call rejected |
//! | `Internal` | 500 | Unexpected server error |

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Generic message returned for every authentication failure.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// Caller input missing a required field or malformed.
    Validation,
    /// Sheet export could not be fetched.
    Fetch,
    /// Sheet export could not be parsed.
    Parse,
    /// Missing or invalid credentials.
    Auth,
    /// Named resource not found.
    NotFound,
    /// An outbound dependency rejected the request.
    Upstream,
    /// Anything else.
    Internal,
}

impl ErrorKind {
    /// HTTP status for this kind.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Auth => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream => StatusCode::BAD_GATEWAY,
            Self::Fetch | Self::Parse | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable reason string for logs.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::Fetch => "FETCH_ERROR",
            Self::Parse => "PARSE_ERROR",
            Self::Auth => "AUTH_ERROR",
            Self::NotFound => "NOT_FOUND",
            Self::Upstream => "UPSTREAM_ERROR",
            Self::Internal => "INTERNAL_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}

/// A classified error ready to be rendered as an HTTP response.
#[derive(Debug, Clone, Error)]
#[error("[{}] {message}", .kind.reason())]
pub struct ApiError {
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Caller input is missing or malformed.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Authentication failed. The message is always generic.
    #[must_use]
    pub fn unauthorized() -> Self {
        Self::new(ErrorKind::Auth, UNAUTHORIZED_MESSAGE)
    }

    /// Named resource not found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Outbound dependency rejected the request.
    #[must_use]
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Upstream, message)
    }

    /// Unexpected failure.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// JSON error body: `{success:false, error}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// Caller-facing message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        if status.is_server_error() {
            tracing::error!(kind = %self.kind, message = %self.message, "Request failed");
        } else {
            tracing::debug!(kind = %self.kind, message = %self.message, "Request rejected");
        }

        (
            status,
            Json(ErrorBody {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}
