//! Application Ports (Driven)
//!
//! Ports define the interfaces the use cases need from the outside world.
//! Adapters in `infrastructure` implement them.

mod alert_port;
mod chat_port;
mod session_port;
mod settings_store_port;
mod sheet_source_port;
mod signature_port;
mod webhook_store_port;

#[cfg(test)]
pub use alert_port::MockAlertDispatcher;
pub use alert_port::{AlertDispatcher, DispatchError};
pub use chat_port::{ChatError, ChatModel, ChatRequest, ChatStream};
pub use session_port::{AuthError, SessionProvider};
pub use settings_store_port::SettingsStore;
#[cfg(test)]
pub use sheet_source_port::MockSheetSource;
pub use sheet_source_port::{PUBLISH_HINT, SheetError, SheetSource};
pub use signature_port::{SignatureError, SignatureVerifier};
pub use webhook_store_port::{WebhookStore, WebhookStoreError};
