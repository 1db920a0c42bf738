//! Application Use Cases
//!
//! Use cases orchestrate domain logic to fulfill application requirements.

mod handle_interaction;
mod relay_chat;
mod scan_sheet;
mod test_webhook;

pub use handle_interaction::{HandleInteractionUseCase, InteractionError};
pub use relay_chat::{MISSING_KEY_MESSAGE, NEURAL_CORE_ERROR, RelayChatError, RelayChatUseCase};
pub use scan_sheet::{ScanCommand, ScanError, ScanOutcome, ScanSheetUseCase};
pub use test_webhook::{TestWebhookError, TestWebhookUseCase};
