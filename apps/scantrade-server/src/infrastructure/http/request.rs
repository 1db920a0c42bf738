//! HTTP request DTOs.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::ScanCommand;
use crate::domain::chat::ChatMessage;

/// Scan request. Fields are optional so a missing `sheetId` is reported as
/// a validation error rather than a body rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    /// Spreadsheet identifier.
    #[serde(default)]
    pub sheet_id: Option<String>,
    /// Destination webhook.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Saved webhook name.
    #[serde(default)]
    pub webhook_name: Option<String>,
}

impl From<ScanRequest> for ScanCommand {
    fn from(request: ScanRequest) -> Self {
        Self {
            sheet_id: request.sheet_id,
            webhook_url: request.webhook_url,
            webhook_name: request.webhook_name,
        }
    }
}

/// Body of `PUT /api/webhooks/{name}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveWebhookRequest {
    /// Delivery URL.
    pub url: String,
}

/// Body of `POST /api/webhooks/test`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestWebhookRequest {
    /// Webhook to test.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Name to save it under.
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `POST /api/leo/chat`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatProxyRequest {
    /// Conversation, oldest first.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    /// Client-held model key.
    #[serde(default)]
    pub api_key: Option<String>,
}
