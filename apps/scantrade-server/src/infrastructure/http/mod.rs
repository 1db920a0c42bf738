//! HTTP/REST API adapter.
//!
//! Inbound adapter implementing REST endpoints that delegate to application use cases.

mod controller;
mod middleware;
mod request;
mod response;

pub use controller::{AppState, create_router};
pub use middleware::{REQUEST_ID_HEADER, require_session, trace_request};
pub use request::*;
pub use response::*;
