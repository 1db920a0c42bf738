//! JSON-file webhook store.
//!
//! The file holds a single object mapping name to URL. Every mutation
//! rewrites it through a temp file and a rename.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::application::ports::{WebhookStore, WebhookStoreError};
use crate::domain::webhook::WebhookEntry;

/// File-backed implementation of `WebhookStore`.
#[derive(Debug)]
pub struct JsonFileWebhookStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl JsonFileWebhookStore {
    /// Open the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookStoreError`] if the file exists but cannot be read
    /// or does not hold a name -> URL object.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, WebhookStoreError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => {
                serde_json::from_str(&contents).map_err(|e| WebhookStoreError::Corrupt {
                    message: format!("{}: {e}", path.display()),
                })?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_error(&path, &e)),
        };

        tracing::info!(path = %path.display(), count = entries.len(), "Loaded webhook store");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), WebhookStoreError> {
        let json =
            serde_json::to_vec_pretty(entries).map_err(|e| WebhookStoreError::Corrupt {
                message: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(parent, &e))?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json)
            .await
            .map_err(|e| io_error(&tmp_path, &e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| io_error(&self.path, &e))
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> WebhookStoreError {
    WebhookStoreError::Io {
        message: format!("{}: {e}", path.display()),
    }
}

#[async_trait]
impl WebhookStore for JsonFileWebhookStore {
    async fn list(&self) -> Result<Vec<WebhookEntry>, WebhookStoreError> {
        let entries = self.entries.lock().await;
        Ok(entries
            .iter()
            .map(|(name, url)| WebhookEntry {
                name: name.clone(),
                url: url.clone(),
            })
            .collect())
    }

    async fn get(&self, name: &str) -> Result<Option<WebhookEntry>, WebhookStoreError> {
        let entries = self.entries.lock().await;
        Ok(entries.get(name).map(|url| WebhookEntry {
            name: name.to_string(),
            url: url.clone(),
        }))
    }

    async fn save(&self, entry: WebhookEntry) -> Result<(), WebhookStoreError> {
        let mut entries = self.entries.lock().await;
        let mut next = entries.clone();
        next.insert(entry.name, entry.url);
        self.persist(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<bool, WebhookStoreError> {
        let mut entries = self.entries.lock().await;
        if !entries.contains_key(name) {
            return Ok(false);
        }
        let mut next = entries.clone();
        next.remove(name);
        self.persist(&next).await?;
        *entries = next;
        Ok(true)
    }
}
