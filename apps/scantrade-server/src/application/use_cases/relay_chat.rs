//! Relay Chat Use Case
//!
//! Resolves the model key, builds the LEO system instruction and hands the
//! conversation to the chat model port.

use std::sync::Arc;

use crate::application::ports::{ChatError, ChatModel, ChatRequest, ChatStream};
use crate::domain::chat::{ChatMessage, ChatRole, system_instruction};

/// Body returned when no API key is available.
pub const MISSING_KEY_MESSAGE: &str =
    "Neural Core Error: API Key missing. Please configure GEMINI_API_KEY.";

/// Body returned when the model call fails before streaming starts.
pub const NEURAL_CORE_ERROR: &str = "Neural Core Error";

/// Chat relay failure.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RelayChatError {
    /// Neither the server nor the client supplied a key.
    #[error("{MISSING_KEY_MESSAGE}")]
    MissingKey,

    /// No user or assistant turns to send.
    #[error("Conversation has no messages")]
    EmptyConversation,

    /// The model call failed before any text was produced.
    #[error(transparent)]
    Model(#[from] ChatError),
}

/// Use case for proxying chat to the hosted model.
pub struct RelayChatUseCase {
    model: Arc<dyn ChatModel>,
    configured_key: Option<String>,
}

impl RelayChatUseCase {
    /// Create a new `RelayChatUseCase`. A configured key takes precedence
    /// over any key the client sends.
    pub fn new(model: Arc<dyn ChatModel>, configured_key: Option<String>) -> Self {
        Self {
            model,
            configured_key: configured_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Start a streamed reply.
    ///
    /// # Errors
    ///
    /// Returns [`RelayChatError`] when no key is available, the conversation
    /// is empty, or the model rejects the request.
    pub async fn execute(
        &self,
        messages: Vec<ChatMessage>,
        client_key: Option<String>,
    ) -> Result<ChatStream, RelayChatError> {
        let api_key = self
            .configured_key
            .clone()
            .or_else(|| client_key.filter(|k| !k.trim().is_empty()))
            .ok_or(RelayChatError::MissingKey)?;

        let system = system_instruction(&messages);
        let turns: Vec<ChatMessage> = messages
            .into_iter()
            .filter(|m| m.role != ChatRole::System)
            .collect();
        if turns.is_empty() {
            return Err(RelayChatError::EmptyConversation);
        }

        tracing::debug!(turns = turns.len(), "Relaying chat");

        let stream = self
            .model
            .stream_reply(ChatRequest {
                api_key,
                system,
                messages: turns,
            })
            .await?;
        Ok(stream)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use futures::StreamExt;
    use std::sync::Mutex;

    /// Records the last request and echoes the key back as one chunk.
    #[derive(Default)]
    struct EchoModel {
        last: Mutex<Option<ChatRequest>>,
    }

    #[async_trait]
    impl ChatModel for EchoModel {
        async fn stream_reply(&self, request: ChatRequest) -> Result<ChatStream, ChatError> {
            let key = request.api_key.clone();
            *self.last.lock().unwrap() = Some(request);
            Ok(futures::stream::iter(vec![Ok(key)]).boxed())
        }
    }

    async fn collect(stream: ChatStream) -> String {
        stream
            .map(|chunk| chunk.unwrap())
            .collect::<Vec<_>>()
            .await
            .concat()
    }

    #[tokio::test]
    async fn configured_key_wins() {
        let model = Arc::new(EchoModel::default());
        let use_case = RelayChatUseCase::new(model, Some("server-key".to_string()));

        let stream = use_case
            .execute(vec![ChatMessage::user("hi")], Some("client-key".to_string()))
            .await
            .unwrap();

        assert_eq!(collect(stream).await, "server-key");
    }

    #[tokio::test]
    async fn falls_back_to_client_key() {
        let model = Arc::new(EchoModel::default());
        let use_case = RelayChatUseCase::new(model, Some(String::new()));

        let stream = use_case
            .execute(vec![ChatMessage::user("hi")], Some("client-key".to_string()))
            .await
            .unwrap();

        assert_eq!(collect(stream).await, "client-key");
    }

    #[tokio::test]
    async fn missing_key_is_rejected() {
        let use_case = RelayChatUseCase::new(Arc::new(EchoModel::default()), None);
        let err = use_case
            .execute(vec![ChatMessage::user("hi")], None)
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RelayChatError::MissingKey));
        assert_eq!(err.to_string(), MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn system_turns_are_folded_out() {
        let model = Arc::new(EchoModel::default());
        let use_case = RelayChatUseCase::new(model.clone(), Some("k".to_string()));
        let messages = vec![
            ChatMessage {
                role: ChatRole::System,
                content: "Be brief.".to_string(),
            },
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];

        let _ = use_case.execute(messages, None).await.unwrap();

        let last = model.last.lock().unwrap().clone().unwrap();
        assert_eq!(last.messages.len(), 2);
        assert!(last.system.ends_with("Be brief."));
    }

    #[tokio::test]
    async fn only_system_turns_is_empty() {
        let use_case = RelayChatUseCase::new(Arc::new(EchoModel::default()), Some("k".into()));
        let err = use_case
            .execute(
                vec![ChatMessage {
                    role: ChatRole::System,
                    content: "x".to_string(),
                }],
                None,
            )
            .await
            .err()
            .unwrap();
        assert!(matches!(err, RelayChatError::EmptyConversation));
    }
}
