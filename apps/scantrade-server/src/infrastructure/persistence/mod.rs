//! Persistence Adapters
//!
//! Webhook and settings stores. The webhook store can be backed by a JSON
//! file; settings live in memory only.

mod in_memory;
mod json_file;

pub use in_memory::{InMemorySettingsStore, InMemoryWebhookStore};
pub use json_file::JsonFileWebhookStore;
