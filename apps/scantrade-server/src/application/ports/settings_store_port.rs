//! Settings Store Port (Driven Port)

use async_trait::async_trait;

use crate::domain::settings::UserSettings;

/// Port for per-user settings persistence, keyed by email.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Saved settings for `user`, if any.
    async fn load(&self, user: &str) -> Option<UserSettings>;

    /// Replace the settings for `user`.
    async fn save(&self, user: &str, settings: UserSettings);
}
