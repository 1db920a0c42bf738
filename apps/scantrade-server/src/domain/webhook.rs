//! Named webhook targets.
//!
//! Replaces the dashboard's browser-local list of saved webhooks with an
//! explicit keyed record that a store can persist.

use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum length of a webhook name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Name used when a caller does not provide one.
pub const DEFAULT_WEBHOOK_NAME: &str = "Test Alert";

/// Validation failures for webhook records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WebhookValidationError {
    /// Name is empty after trimming.
    #[error("Webhook name cannot be empty")]
    EmptyName,

    /// Name is longer than [`MAX_NAME_LEN`].
    #[error("Webhook name exceeds {MAX_NAME_LEN} characters")]
    NameTooLong,

    /// URL does not parse or is not http(s).
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),
}

/// A saved webhook: a name mapped to a delivery URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookEntry {
    /// Unique, trimmed name.
    pub name: String,
    /// Delivery URL.
    pub url: String,
}

impl WebhookEntry {
    /// Validate and normalize a name/URL pair.
    ///
    /// # Errors
    ///
    /// Returns [`WebhookValidationError`] when either part is unusable.
    pub fn new(name: &str, url: &str) -> Result<Self, WebhookValidationError> {
        Ok(Self {
            name: normalize_name(name)?,
            url: validate_url(url)?,
        })
    }
}

/// Trim a webhook name and check its length.
///
/// # Errors
///
/// Returns [`WebhookValidationError::EmptyName`] or
/// [`WebhookValidationError::NameTooLong`].
pub fn normalize_name(name: &str) -> Result<String, WebhookValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(WebhookValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(WebhookValidationError::NameTooLong);
    }
    Ok(name.to_string())
}

/// Check that a URL parses and uses http or https.
///
/// # Errors
///
/// Returns [`WebhookValidationError::InvalidUrl`] otherwise.
pub fn validate_url(raw: &str) -> Result<String, WebhookValidationError> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).map_err(|e| WebhookValidationError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(WebhookValidationError::InvalidUrl(format!(
            "unsupported scheme '{other}'"
        ))),
    }
}
