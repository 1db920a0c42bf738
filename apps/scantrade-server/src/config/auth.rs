//! Static bearer-token session table.

use serde::{Deserialize, Serialize};

use crate::domain::session::Role;

/// Auth configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Accepted sessions. Empty means every protected route answers 401.
    #[serde(default)]
    pub sessions: Vec<SessionEntry>,
}

/// One accepted bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEntry {
    /// Bearer token.
    pub token: String,
    /// User email; also the settings key.
    pub email: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Role.
    #[serde(default)]
    pub role: Role,
}
