//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use profile_api::{config::Settings, server::create_app, types::Envelope};
use serde_json::Value;
use tower::ServiceExt;

/// Create a fresh application with an empty store
pub fn test_app() -> Router {
    create_app(&Settings::default())
}

/// Response captured from a single request
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Body decoded as a JSON envelope
    pub fn envelope(&self) -> Envelope<Value> {
        serde_json::from_slice(&self.body).expect("response body is not an envelope")
    }

    /// Body as UTF-8 text
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

/// Send one request through `app`
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap().to_string());
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        content_type,
        body,
    }
}

/// Create a user and return its identifier
pub async fn create_user(app: &Router, first: &str, last: &str, bio: &str) -> String {
    let body = serde_json::json!({
        "first_name": first,
        "last_name": last,
        "biography": bio,
    })
    .to_string();

    let response = send(app, "POST", "/api/users", Some(&body)).await;
    assert_eq!(response.status, StatusCode::CREATED);

    response.envelope().data.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}
