//! JSON response helpers

use crate::{error::api::INTERNAL_MESSAGE, types::Envelope};
use axum::{
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::any::Any;

/// Serialize `envelope` and send it with `status`
///
/// If serialization fails the failure is logged and the client receives a
/// 500 with a generic error envelope instead.
pub fn send_json<T: Serialize>(status: StatusCode, envelope: &Envelope<T>) -> Response {
    match serde_json::to_vec(envelope) {
        Ok(body) => json_response(status, body),
        Err(e) => {
            tracing::error!("Failed to serialize JSON response: {}", e);
            let fallback = format!(r#"{{"error":"{}"}}"#, INTERNAL_MESSAGE);
            json_response(StatusCode::INTERNAL_SERVER_ERROR, fallback.into_bytes())
        }
    }
}

/// Response sent in place of a handler that panicked
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let details = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic payload");
    tracing::error!("Request handler panicked: {}", details);

    send_json(
        StatusCode::INTERNAL_SERVER_ERROR,
        &Envelope::<()>::error(INTERNAL_MESSAGE),
    )
}

fn json_response(status: StatusCode, body: Vec<u8>) -> Response {
    (
        status,
        [(CONTENT_TYPE, HeaderValue::from_static("application/json"))],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serializer;

    /// Payload whose serialization always fails
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("refusing to serialize"))
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_send_json_sets_status_and_content_type() {
        let response = send_json(StatusCode::CREATED, &Envelope::data("hello"));

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(body_string(response).await, r#"{"data":"hello"}"#);
    }

    #[tokio::test]
    async fn test_serialization_failure_becomes_500() {
        let response = send_json(StatusCode::OK, &Envelope::data(Unserializable));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_string(response).await,
            r#"{"error":"something went wrong"}"#
        );
    }
}
