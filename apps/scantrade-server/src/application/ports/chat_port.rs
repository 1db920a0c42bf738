//! Chat Model Port (Driven Port)
//!
//! Interface for a hosted generative model that streams a text reply.

use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::domain::chat::ChatMessage;

/// Streamed reply: text fragments in order.
pub type ChatStream = BoxStream<'static, Result<String, ChatError>>;

/// A completion request.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// API key for the hosted model.
    pub api_key: String,
    /// Full system instruction.
    pub system: String,
    /// Conversation turns, oldest first.
    pub messages: Vec<ChatMessage>,
}

/// Chat model error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChatError {
    /// The model API answered with a non-2xx status.
    #[error("Chat API returned status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or error message.
        message: String,
    },

    /// Transport failure.
    #[error("Chat API request failed: {0}")]
    Network(String),

    /// A streamed event could not be decoded.
    #[error("Malformed chat stream event: {0}")]
    Decode(String),
}

/// Port for hosted chat models.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Start a streamed reply.
    async fn stream_reply(&self, request: ChatRequest) -> Result<ChatStream, ChatError>;
}
