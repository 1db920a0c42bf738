//! Webhook Management Tests
//!
//! Saved-webhook CRUD and the test-alert endpoint behind session auth.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{TOKEN, default_app, empty_request, json_request, send};

// =============================================================================
// CRUD
// =============================================================================

#[tokio::test]
async fn save_list_delete_cycle() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    let listed = send(&app, empty_request(Method::GET, "/api/webhooks", Some(TOKEN))).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json(), json!({ "webhooks": [] }));

    let saved = send(
        &app,
        json_request(
            Method::PUT,
            "/api/webhooks/desk",
            &json!({ "url": "https://discord.com/api/webhooks/1/abc" }),
            Some(TOKEN),
        ),
    )
    .await;
    assert_eq!(saved.status, StatusCode::OK);
    assert_eq!(
        saved.json(),
        json!({
            "success": true,
            "webhook": { "name": "desk", "url": "https://discord.com/api/webhooks/1/abc" }
        })
    );

    let listed = send(&app, empty_request(Method::GET, "/api/webhooks", Some(TOKEN))).await;
    assert_eq!(listed.json()["webhooks"][0]["name"], "desk");

    let deleted = send(
        &app,
        empty_request(Method::DELETE, "/api/webhooks/desk", Some(TOKEN)),
    )
    .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let again = send(
        &app,
        empty_request(Method::DELETE, "/api/webhooks/desk", Some(TOKEN)),
    )
    .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(again.json()["error"], "Webhook not found: desk");
}

#[tokio::test]
async fn saving_same_name_replaces_url() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    for url in ["https://hooks.example/one", "https://hooks.example/two"] {
        let saved = send(
            &app,
            json_request(
                Method::PUT,
                "/api/webhooks/desk",
                &json!({ "url": url }),
                Some(TOKEN),
            ),
        )
        .await;
        assert_eq!(saved.status, StatusCode::OK);
    }

    let listed = send(&app, empty_request(Method::GET, "/api/webhooks", Some(TOKEN))).await;
    let webhooks = listed.json()["webhooks"].as_array().unwrap().clone();
    assert_eq!(webhooks.len(), 1);
    assert_eq!(webhooks[0]["url"], "https://hooks.example/two");
}

#[tokio::test]
async fn invalid_url_is_rejected() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(
            Method::PUT,
            "/api/webhooks/desk",
            &json!({ "url": "ftp://hooks.example/x" }),
            Some(TOKEN),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["success"], false);
}

#[tokio::test]
async fn webhook_routes_require_session() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    let response = send(&app, empty_request(Method::GET, "/api/webhooks", None)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Test alert
// =============================================================================

#[tokio::test]
async fn accepted_test_alert_saves_default_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_partial_json(json!({
            "embeds": [{ "title": "🧪 Test Alert: Test Alert", "color": 3_447_003 }]
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    let app = default_app(&server.uri()).await;
    let url = format!("{}/hook", server.uri());

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/webhooks/test",
            &json!({ "webhookUrl": url }),
            Some(TOKEN),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["webhook"]["name"], "Test Alert");

    let listed = send(&app, empty_request(Method::GET, "/api/webhooks", Some(TOKEN))).await;
    assert_eq!(listed.json()["webhooks"][0]["url"], url);
}

#[tokio::test]
async fn rejected_test_alert_is_bad_gateway_and_not_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/webhooks/test",
            &json!({ "webhookUrl": format!("{}/hook", server.uri()), "name": "Desk" }),
            Some(TOKEN),
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    let body = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().starts_with("Test alert failed"));

    let listed = send(&app, empty_request(Method::GET, "/api/webhooks", Some(TOKEN))).await;
    assert_eq!(listed.json(), json!({ "webhooks": [] }));
}

#[tokio::test]
async fn test_alert_requires_url() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(Method::POST, "/api/webhooks/test", &json!({}), Some(TOKEN)),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"], "Missing Webhook URL");
}
