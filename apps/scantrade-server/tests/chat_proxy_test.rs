//! Chat Proxy Tests
//!
//! The model is a wiremock server answering with server-sent events.

#![allow(clippy::unwrap_used)]

mod common;

use axum::http::{Method, StatusCode, header};
use serde_json::json;
use wiremock::matchers::{header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{app, config_yaml, default_app, json_request, send};

const MODEL_PATH: &str = "/models/gemini-1.5-flash:streamGenerateContent";

fn sse(fragments: &[&str]) -> String {
    fragments
        .iter()
        .map(|text| {
            let chunk = json!({
                "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
            });
            format!("data: {chunk}\n\n")
        })
        .collect()
}

async fn mount_model(server: &MockServer, api_key: &str, fragments: &[&str]) {
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .and(query_param("alt", "sse"))
        .and(header_eq("x-goog-api-key", api_key))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse(fragments)),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn conversation() -> serde_json::Value {
    json!([
        { "role": "system", "content": "ignored" },
        { "role": "user", "content": "Is BTC trending?" }
    ])
}

#[tokio::test]
async fn streams_reply_with_client_key() {
    let server = MockServer::start().await;
    mount_model(&server, "client-key", &["BTC is ", "holding support."]).await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/leo/chat",
            &json!({ "messages": conversation(), "apiKey": "client-key" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response.headers[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(response.text(), "BTC is holding support.");
}

#[tokio::test]
async fn configured_key_wins_over_client_key() {
    let server = MockServer::start().await;
    mount_model(&server, "server-key", &["ok"]).await;
    let yaml = config_yaml(&server.uri(), "").replacen(
        "chat:\n",
        "chat:\n  api_key: \"server-key\"\n",
        1,
    );
    let app = app(&yaml).await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/leo/chat",
            &json!({ "messages": conversation(), "apiKey": "client-key" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");
}

#[tokio::test]
async fn missing_key_is_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/leo/chat",
            &json!({ "messages": conversation() }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.text().contains("API Key"));
}

#[tokio::test]
async fn empty_conversation_is_bad_request() {
    let server = MockServer::start().await;
    let app = default_app(&server.uri()).await;

    for messages in [json!([]), json!([{ "role": "system", "content": "only" }])] {
        let response = send(
            &app,
            json_request(
                Method::POST,
                "/api/leo/chat",
                &json!({ "messages": messages, "apiKey": "client-key" }),
                None,
            ),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn upstream_rejection_is_neural_core_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("API key not valid"))
        .mount(&server)
        .await;
    let app = default_app(&server.uri()).await;

    let response = send(
        &app,
        json_request(
            Method::POST,
            "/api/leo/chat",
            &json!({ "messages": conversation(), "apiKey": "bad" }),
            None,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.text(), "Neural Core Error");
}
