//! Shared harness for router-level tests.
//!
//! Builds the real adapters from a YAML config pointed at wiremock servers
//! and drives the router with `oneshot`.

#![allow(dead_code, clippy::unwrap_used)]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use scantrade_server::config::load_config_from_string;
use scantrade_server::infrastructure::config::Container;
use scantrade_server::infrastructure::http::create_router;

/// Bearer token accepted by every test app.
pub const TOKEN: &str = "tok-test";

/// Email of the test session.
pub const EMAIL: &str = "trader@scantrade.io";

/// CSV used by the scan scenarios.
pub const SHEET_CSV: &str = "Header\nAAPL,BUY,150\nMSFT,SELL,300\n";

/// Base YAML: sheet and chat traffic go to `upstream`, one `pro` session.
pub fn config_yaml(upstream: &str, extra: &str) -> String {
    format!(
        r#"
sheets:
  base_url: "{upstream}"
  timeout_secs: 2
discord:
  timeout_secs: 2
chat:
  base_url: "{upstream}"
  timeout_secs: 5
auth:
  sessions:
    - token: "{TOKEN}"
      email: "{EMAIL}"
      name: "Trader"
      role: pro
{extra}
"#
    )
}

/// Build a router from YAML.
pub async fn app(yaml: &str) -> Router {
    let config = load_config_from_string(yaml).unwrap();
    let container = Container::from_config(config).await.unwrap();
    create_router(container.app_state("test"))
}

/// Build a router with the base config and no extras.
pub async fn default_app(upstream: &str) -> Router {
    app(&config_yaml(upstream, "")).await
}

/// A JSON request, optionally authenticated.
pub fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// A bodyless request, optionally authenticated.
pub fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

/// Collected response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

/// Send one request through a clone of the router.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    TestResponse {
        status,
        headers,
        body: body.to_vec(),
    }
}
