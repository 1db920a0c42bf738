//! Webhook store backing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file for saved webhooks. In-memory when unset.
    #[serde(default)]
    pub webhooks_path: Option<PathBuf>,
}
