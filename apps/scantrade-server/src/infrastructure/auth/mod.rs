//! Session adapters.

mod static_tokens;

pub use static_tokens::StaticTokenSessions;
