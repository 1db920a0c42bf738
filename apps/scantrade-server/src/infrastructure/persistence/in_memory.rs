//! In-memory stores.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{SettingsStore, WebhookStore, WebhookStoreError};
use crate::domain::settings::UserSettings;
use crate::domain::webhook::WebhookEntry;

/// In-memory implementation of `WebhookStore`. Lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryWebhookStore {
    entries: RwLock<BTreeMap<String, String>>,
}

impl InMemoryWebhookStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WebhookStore for InMemoryWebhookStore {
    async fn list(&self) -> Result<Vec<WebhookEntry>, WebhookStoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .map(|(name, url)| WebhookEntry {
                name: name.clone(),
                url: url.clone(),
            })
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<WebhookEntry>, WebhookStoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(name).map(|url| WebhookEntry {
            name: name.to_string(),
            url: url.clone(),
        }))
    }

    async fn save(&self, entry: WebhookEntry) -> Result<(), WebhookStoreError> {
        self.entries.write().await.insert(entry.name, entry.url);
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<bool, WebhookStoreError> {
        Ok(self.entries.write().await.remove(name).is_some())
    }
}

/// In-memory implementation of `SettingsStore`, keyed by email.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    settings: RwLock<HashMap<String, UserSettings>>,
}

impl InMemorySettingsStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self, user: &str) -> Option<UserSettings> {
        self.settings.read().await.get(user).cloned()
    }

    async fn save(&self, user: &str, settings: UserSettings) {
        self.settings.write().await.insert(user.to_string(), settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> WebhookEntry {
        WebhookEntry::new(name, &format!("https://hooks.example/{name}")).unwrap()
    }

    #[tokio::test]
    async fn list_is_sorted_by_name() {
        let store = InMemoryWebhookStore::new();
        store.save(entry("zeta")).await.unwrap();
        store.save(entry("alpha")).await.unwrap();

        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[tokio::test]
    async fn save_replaces_existing() {
        let store = InMemoryWebhookStore::new();
        store.save(entry("desk")).await.unwrap();
        store
            .save(WebhookEntry::new("desk", "https://hooks.example/new").unwrap())
            .await
            .unwrap();

        let got = store.get("desk").await.unwrap().unwrap();
        assert_eq!(got.url, "https://hooks.example/new");
        assert_eq!(store.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn remove_reports_presence() {
        let store = InMemoryWebhookStore::new();
        store.save(entry("desk")).await.unwrap();

        assert!(store.remove("desk").await.unwrap());
        assert!(!store.remove("desk").await.unwrap());
        assert!(store.get("desk").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn settings_are_per_user() {
        let store = InMemorySettingsStore::new();
        let light = UserSettings {
            theme: "light".to_string(),
            ..UserSettings::default()
        };
        store.save("a@example.com", light.clone()).await;

        assert_eq!(store.load("a@example.com").await, Some(light));
        assert!(store.load("b@example.com").await.is_none());
    }
}
