//! Bearer-token sessions from a fixed table loaded at startup.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::application::ports::{AuthError, SessionProvider};
use crate::config::SessionEntry;
use crate::domain::session::Session;

/// `SessionProvider` over a static token table.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenSessions {
    sessions: HashMap<String, Session>,
}

impl StaticTokenSessions {
    /// Build the table. User ids are assigned from position.
    #[must_use]
    pub fn new(entries: &[SessionEntry]) -> Self {
        let sessions = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let name = if entry.name.is_empty() {
                    entry.email.clone()
                } else {
                    entry.name.clone()
                };
                (
                    entry.token.clone(),
                    Session {
                        user_id: format!("user-{}", i + 1),
                        email: entry.email.clone(),
                        name,
                        role: entry.role,
                    },
                )
            })
            .collect();
        Self { sessions }
    }

    /// Number of accepted tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Whether no token is accepted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionProvider for StaticTokenSessions {
    async fn resolve(&self, token: &str) -> Result<Option<Session>, AuthError> {
        Ok(self.sessions.get(token).cloned())
    }
}
