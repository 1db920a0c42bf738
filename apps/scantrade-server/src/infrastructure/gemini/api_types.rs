//! Gemini REST API request and response types.

use serde::{Deserialize, Serialize};

use crate::domain::chat::{ChatMessage, ChatRole};

/// `streamGenerateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// System instruction.
    pub system_instruction: Content,
    /// Conversation turns.
    pub contents: Vec<Content>,
}

/// A role-tagged list of parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// `user` or `model`; absent on system instructions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A single text part.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text, if this is a text part.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

impl Content {
    /// Untagged content with one text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }

    /// Map a conversation turn. System turns have no upstream role.
    pub fn from_message(message: &ChatMessage) -> Option<Self> {
        let role = match message.role {
            ChatRole::User => "user",
            ChatRole::Assistant => "model",
            ChatRole::System => return None,
        };
        Some(Self {
            role: Some(role.to_string()),
            ..Self::text(message.content.clone())
        })
    }
}

/// One streamed response chunk.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateContentResponse {
    /// Candidates; only the first is read.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Set instead of candidates when the API fails mid-stream.
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// A response candidate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Candidate {
    /// Candidate content.
    #[serde(default)]
    pub content: Content,
}

/// Error envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP-style code.
    #[serde(default)]
    pub code: u16,
    /// Message.
    #[serde(default)]
    pub message: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .map(|c| {
                c.content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect()
            })
            .unwrap_or_default()
    }
}
