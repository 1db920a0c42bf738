//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.
//!
//! | Route | Auth | Handler |
//! |-------|------|---------|
//! | `GET /health` | public | `health_check` |
//! | `POST /scan` | public | `scan` |
//! | `POST /api/interactions` | signature | `interactions` |
//! | `POST /api/leo/chat` | public | `chat` |
//! | `POST /api/scanner` | session | `scan` |
//! | `GET /api/webhooks` | session | `list_webhooks` |
//! | `POST /api/webhooks/test` | session | `test_webhook` |
//! | `PUT/DELETE /api/webhooks/{name}` | session | `save_webhook`, `delete_webhook` |
//! | `GET/POST /api/settings` | session | `get_settings`, `save_settings` |
//! | `GET /api/governance/rules` | session | `governance_rules` |
//! | `GET /api/governance/risk-limits` | session | `risk_limits` |
//! | `GET /api/scanners` | session | `list_scanners` |
//! | `GET /api/scanners/{id}` | session | `get_scanner` |

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    Extension, Json, Router,
    body::{Body, Bytes},
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use futures::StreamExt;

use crate::application::ports::{SessionProvider, SettingsStore, WebhookStore};
use crate::application::use_cases::{
    HandleInteractionUseCase, InteractionError, MISSING_KEY_MESSAGE, NEURAL_CORE_ERROR,
    RelayChatError, RelayChatUseCase, ScanSheetUseCase, TestWebhookUseCase,
};
use crate::domain::governance::RiskLimits;
use crate::domain::scanner::{SCANNERS, ScannerDescriptor, find_scanner};
use crate::domain::session::Session;
use crate::domain::settings::UserSettings;
use crate::domain::webhook::WebhookEntry;
use crate::error::ApiError;

use super::middleware::{require_session, trace_request};
use super::request::{ChatProxyRequest, SaveWebhookRequest, ScanRequest, TestWebhookRequest};
use super::response::{
    GovernanceRulesResponse, HealthResponse, InvalidRequestResponse, RiskLimitsResponse,
    ScanResponse, ScannerListResponse, SettingsResponse, SettingsSavedResponse,
    WebhookListResponse, WebhookResponse,
};

const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sheet scan use case.
    pub scan: Arc<ScanSheetUseCase>,
    /// Webhook test use case.
    pub test_webhook: Arc<TestWebhookUseCase>,
    /// Chat relay use case.
    pub chat: Arc<RelayChatUseCase>,
    /// Interaction handler.
    pub interactions: Arc<HandleInteractionUseCase>,
    /// Saved webhooks.
    pub webhooks: Arc<dyn WebhookStore>,
    /// Per-user settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Session lookup for protected routes.
    pub sessions: Arc<dyn SessionProvider>,
    /// Configured governance limits.
    pub risk_limits: RiskLimits,
    /// Application version.
    pub version: String,
}

/// Create the HTTP router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/scanner", post(scan))
        .route("/api/webhooks", get(list_webhooks))
        .route("/api/webhooks/test", post(test_webhook))
        .route(
            "/api/webhooks/{name}",
            put(save_webhook).delete(delete_webhook),
        )
        .route("/api/settings", get(get_settings).post(save_settings))
        .route("/api/governance/rules", get(governance_rules))
        .route("/api/governance/risk-limits", get(risk_limits))
        .route("/api/scanners", get(list_scanners))
        .route("/api/scanners/{id}", get(get_scanner))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/scan", post(scan))
        .route("/api/interactions", post(interactions))
        .route("/api/leo/chat", post(chat))
        .merge(protected)
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

fn rejection(e: &JsonRejection) -> ApiError {
    ApiError::validation(e.body_text())
}

fn plain_text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(CONTENT_TYPE, PLAIN_TEXT)], body.into()).into_response()
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Scan a sheet and optionally alert on its newest signal.
async fn scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejection(&e))?;
    let outcome = state.scan.execute(request.into()).await?;

    Ok(Json(ScanResponse {
        success: true,
        signals: outcome.signals,
        alert_sent: outcome.alert_sent,
    }))
}

/// List saved webhooks.
async fn list_webhooks(
    State(state): State<AppState>,
) -> Result<Json<WebhookListResponse>, ApiError> {
    let webhooks = state
        .webhooks
        .list()
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(WebhookListResponse { webhooks }))
}

/// Save (or replace) a webhook under `name`.
async fn save_webhook(
    State(state): State<AppState>,
    Path(name): Path<String>,
    payload: Result<Json<SaveWebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejection(&e))?;
    let entry =
        WebhookEntry::new(&name, &request.url).map_err(|e| ApiError::validation(e.to_string()))?;

    state
        .webhooks
        .save(entry.clone())
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;
    tracing::info!(name = %entry.name, "Webhook saved");

    Ok(Json(WebhookResponse {
        success: true,
        webhook: entry,
    }))
}

/// Delete a saved webhook.
async fn delete_webhook(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let removed = state
        .webhooks
        .remove(name.trim())
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    if removed {
        tracing::info!(name = %name, "Webhook deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Webhook not found: {name}")))
    }
}

/// Send a test embed; save the webhook if it is accepted.
async fn test_webhook(
    State(state): State<AppState>,
    payload: Result<Json<TestWebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| rejection(&e))?;
    let url = request
        .webhook_url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Missing Webhook URL"))?;

    let webhook = state
        .test_webhook
        .execute(&url, request.name.as_deref())
        .await?;

    Ok(Json(WebhookResponse {
        success: true,
        webhook,
    }))
}

/// Rules derived from the configured limits.
async fn governance_rules(State(state): State<AppState>) -> Json<GovernanceRulesResponse> {
    Json(GovernanceRulesResponse {
        rules: state.risk_limits.rules(),
    })
}

async fn risk_limits(State(state): State<AppState>) -> Json<RiskLimitsResponse> {
    Json(state.risk_limits.into())
}

async fn list_scanners() -> Json<ScannerListResponse> {
    Json(ScannerListResponse { scanners: &SCANNERS })
}

/// One catalogue entry by id.
async fn get_scanner(Path(id): Path<String>) -> Result<Json<ScannerDescriptor>, ApiError> {
    find_scanner(&id)
        .copied()
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Scanner not found"))
}

/// Settings for the calling user, or defaults.
async fn get_settings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Json<SettingsResponse> {
    let settings = state.settings.load(&session.email).await.unwrap_or_default();
    Json(SettingsResponse {
        settings,
        user_role: session.role.label().to_string(),
    })
}

/// Replace the calling user's settings.
async fn save_settings(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    payload: Result<Json<UserSettings>, JsonRejection>,
) -> Response {
    let Ok(Json(settings)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(InvalidRequestResponse {
                error: "Invalid request".to_string(),
            }),
        )
            .into_response();
    };

    state.settings.save(&session.email, settings.clone()).await;
    tracing::debug!(user = %session.user_id, "Settings saved");

    Json(SettingsSavedResponse {
        message: "Settings saved successfully".to_string(),
        data: settings,
    })
    .into_response()
}

/// Signed Discord interaction endpoint.
async fn interactions(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    match state.interactions.execute(
        header("x-signature-ed25519"),
        header("x-signature-timestamp"),
        &body,
    ) {
        Ok(response) => Json(response).into_response(),
        Err(e @ InteractionError::BadSignature) => {
            plain_text(StatusCode::UNAUTHORIZED, e.to_string())
        }
        Err(e @ InteractionError::UnknownType) => plain_text(StatusCode::BAD_REQUEST, e.to_string()),
    }
}

/// Stream an assistant reply as plain text.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatProxyRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = payload else {
        return plain_text(
            StatusCode::BAD_REQUEST,
            format!("{NEURAL_CORE_ERROR}: invalid request body"),
        );
    };
    if request.messages.is_empty() {
        return plain_text(
            StatusCode::BAD_REQUEST,
            format!("{NEURAL_CORE_ERROR}: messages must not be empty"),
        );
    }

    let stream = match state.chat.execute(request.messages, request.api_key).await {
        Ok(stream) => stream,
        Err(RelayChatError::MissingKey) => {
            tracing::warn!("Chat request without API key");
            return plain_text(StatusCode::UNAUTHORIZED, MISSING_KEY_MESSAGE);
        }
        Err(RelayChatError::EmptyConversation) => {
            return plain_text(
                StatusCode::BAD_REQUEST,
                format!("{NEURAL_CORE_ERROR}: messages must not be empty"),
            );
        }
        Err(RelayChatError::Model(e)) => {
            tracing::error!(error = %e, "Chat upstream failed");
            return plain_text(StatusCode::INTERNAL_SERVER_ERROR, NEURAL_CORE_ERROR);
        }
    };

    let body = stream
        .take_while(|fragment| {
            if let Err(e) = fragment {
                tracing::error!(error = %e, "Chat stream interrupted");
            }
            futures::future::ready(fragment.is_ok())
        })
        .filter_map(|fragment| futures::future::ready(fragment.ok()))
        .map(Ok::<_, Infallible>);

    ([(CONTENT_TYPE, PLAIN_TEXT)], Body::from_stream(body)).into_response()
}
