//! Authenticated session as seen by the API.

use serde::{Deserialize, Serialize};

/// Subscription role attached to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Operator with full access.
    Admin,
    /// Paying user.
    Pro,
    /// Everyone else.
    #[default]
    Free,
}

impl Role {
    /// Display label used in API responses.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Pro => "pro",
            Self::Free => "Free",
        }
    }
}

/// A resolved, trusted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Stable user id.
    pub user_id: String,
    /// Email address.
    pub email: String,
    /// Display name.
    pub name: String,
    /// Role.
    pub role: Role,
}
