//! Gemini adapter implementing `ChatModel`.

use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

use crate::application::ports::{ChatError, ChatModel, ChatRequest, ChatStream};
use crate::config::ChatConfig;

use super::api_types::{Content, GenerateContentRequest, GenerateContentResponse};
use super::sse::SseDecoder;

/// Streams replies from `models/{model}:streamGenerateContent?alt=sse`.
#[derive(Debug, Clone)]
pub struct GeminiChatAdapter {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiChatAdapter {
    /// Create a new adapter from config.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ChatError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url, self.model
        )
    }
}

/// Turn one SSE data payload into a text fragment. Empty fragments are
/// dropped by the caller.
fn decode_event(data: &str) -> Result<String, ChatError> {
    let chunk: GenerateContentResponse =
        serde_json::from_str(data).map_err(|e| ChatError::Decode(e.to_string()))?;
    if let Some(error) = chunk.error {
        return Err(ChatError::Api {
            status: error.code,
            message: error.message,
        });
    }
    Ok(chunk.text())
}

#[async_trait]
impl ChatModel for GeminiChatAdapter {
    async fn stream_reply(&self, request: ChatRequest) -> Result<ChatStream, ChatError> {
        let body = GenerateContentRequest {
            system_instruction: Content::text(request.system),
            contents: request
                .messages
                .iter()
                .filter_map(Content::from_message)
                .collect(),
        };

        tracing::debug!(model = %self.model, turns = body.contents.len(), "Calling Gemini");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", request.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = Box::pin(response.bytes_stream());
        let stream = futures::stream::unfold(
            (bytes, Some(SseDecoder::new())),
            |(mut bytes, decoder)| async move {
                // `None` once the body is exhausted or failed.
                let mut decoder = decoder?;
                match bytes.next().await {
                    Some(Ok(chunk)) => {
                        let batch: Vec<_> = decoder
                            .push(&chunk)
                            .iter()
                            .map(|data| decode_event(data))
                            .collect();
                        Some((batch, (bytes, Some(decoder))))
                    }
                    Some(Err(e)) => {
                        let failure = vec![Err(ChatError::Network(e.to_string()))];
                        Some((failure, (bytes, None)))
                    }
                    None => {
                        let tail: Vec<_> = decoder
                            .finish()
                            .iter()
                            .map(|data| decode_event(data))
                            .collect();
                        Some((tail, (bytes, None)))
                    }
                }
            },
        )
        .flat_map(futures::stream::iter)
        .filter(|fragment| {
            futures::future::ready(!matches!(fragment, Ok(text) if text.is_empty()))
        });

        Ok(stream.boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chat::ChatMessage;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn adapter(base_url: &str) -> GeminiChatAdapter {
        GeminiChatAdapter::new(&ChatConfig {
            base_url: base_url.to_string(),
            api_key: None,
            model: "gemini-test".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest {
            api_key: "k-123".to_string(),
            system: "sys".to_string(),
            messages: vec![ChatMessage::user("hi")],
        }
    }

    fn sse(chunks: &[&str]) -> String {
        chunks
            .iter()
            .map(|text| {
                format!(
                    "data: {{\"candidates\":[{{\"content\":{{\"role\":\"model\",\"parts\":[{{\"text\":\"{text}\"}}]}}}}]}}\r\n\r\n"
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn streams_text_parts_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-test:streamGenerateContent"))
            .and(query_param("alt", "sse"))
            .and(header("x-goog-api-key", "k-123"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }]
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(sse(&["Market ", "", "is open."])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let stream = adapter(&server.uri()).stream_reply(request()).await.unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;

        assert_eq!(fragments, vec!["Market ", "is open."]);
    }

    #[tokio::test]
    async fn unterminated_final_event_is_delivered() {
        let server = MockServer::start().await;
        let mut body = sse(&["one "]);
        body.push_str(
            "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"two\"}]}}]}",
        );
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/event-stream")
                    .set_body_string(body),
            )
            .mount(&server)
            .await;

        let stream = adapter(&server.uri()).stream_reply(request()).await.unwrap();
        let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;

        assert_eq!(fragments, vec!["one ", "two"]);
    }

    #[tokio::test]
    async fn upstream_rejection_fails_before_streaming() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = adapter(&server.uri())
            .stream_reply(request())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ChatError::Api { status: 400, ref message } if message.contains("API key")));
    }

    #[test]
    fn error_event_is_api_error() {
        let err = decode_event(r#"{"error":{"code":429,"message":"quota"}}"#).unwrap_err();
        assert!(matches!(err, ChatError::Api { status: 429, .. }));
        assert!(matches!(decode_event("{oops"), Err(ChatError::Decode(_))));
    }
}
