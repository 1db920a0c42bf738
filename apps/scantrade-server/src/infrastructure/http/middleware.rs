//! Request middleware: correlation ids and the bearer-session gate.

use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

use crate::error::ApiError;

use super::controller::AppState;

/// Resolve `Authorization: Bearer <token>` to a [`Session`] and attach it
/// as a request extension. Anything else is a 401.
///
/// [`Session`]: crate::domain::session::Session
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let Some(token) = token else {
        tracing::warn!(path = %request.uri().path(), "Missing bearer token");
        return Err(ApiError::unauthorized());
    };

    match state.sessions.resolve(&token).await {
        Ok(Some(session)) => {
            request.extensions_mut().insert(session);
            Ok(next.run(request).await)
        }
        Ok(None) => {
            tracing::warn!(path = %request.uri().path(), "Unknown bearer token");
            Err(ApiError::unauthorized())
        }
        Err(e) => Err(ApiError::internal(e.to_string())),
    }
}

/// Response header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Run each request inside a span tagged with a fresh request id, log its
/// outcome, and echo the id back in `x-request-id`.
pub async fn trace_request(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let span = tracing::info_span!("http_request", %request_id, %method, %path);

    async move {
        let started = Instant::now();
        let mut response = next.run(request).await;
        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Request completed"
        );
        if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}
