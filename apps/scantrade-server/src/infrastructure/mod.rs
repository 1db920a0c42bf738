//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the application layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**: Implement ports for external systems
//!   - `sheets/`: Spreadsheet CSV export (Google Sheets)
//!   - `discord/`: Webhook delivery and interaction signatures
//!   - `gemini/`: Streaming chat model
//!   - `persistence/`: Webhook and settings stores
//!   - `auth/`: Bearer-token sessions
//!
//! - **Driver Adapters (Inbound)**: Expose application to external world
//!   - `http/`: REST API controllers and the session gate
//!
//! - **Wiring**: `config/` builds every adapter from the loaded `Config`

pub mod auth;
pub mod config;
pub mod discord;
pub mod gemini;
pub mod http;
pub mod persistence;
pub mod sheets;
