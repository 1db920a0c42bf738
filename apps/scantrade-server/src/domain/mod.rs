//! Domain Layer
//!
//! Pure types and rules with no I/O. Everything here is request-scoped or a
//! plain record; persistence and delivery live in adapters.
//!
//! # Bounded Contexts
//!
//! - [`signal`]: Sheet rows to normalized signals
//! - [`alert`]: Webhook message formatting and color rules
//! - [`webhook`]: Named webhook targets
//! - [`session`]: Authenticated user and role
//! - [`settings`]: Per-user dashboard preferences
//! - [`chat`]: Assistant conversation turns and system prompt
//! - [`interaction`]: Discord interaction envelope
//! - [`governance`]: Risk limits and the rules shown for them
//! - [`scanner`]: Built-in scanner catalogue

pub mod alert;
pub mod chat;
pub mod governance;
pub mod interaction;
pub mod session;
pub mod scanner;
pub mod settings;
pub mod signal;
pub mod webhook;
