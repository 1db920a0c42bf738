//! Gemini generative-language adapter for the chat proxy.

mod adapter;
mod api_types;
mod sse;

pub use adapter::GeminiChatAdapter;
pub use sse::SseDecoder;
