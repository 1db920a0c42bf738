//! Discord adapters: webhook delivery and interaction signature checks.

mod signature;
mod webhook;

pub use signature::Ed25519Verifier;
pub use webhook::DiscordWebhookDispatcher;
