//! HTTP-facing error taxonomy
//!
//! Each variant maps to a fixed status code and message. Everything except
//! [`ApiError::InvalidId`] and an oversized body is rendered as a JSON
//! [`Envelope`].

use crate::{server::response::send_json, types::Envelope};
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Message returned when a request body cannot be decoded as a user
pub const INVALID_BODY_MESSAGE: &str = "Please provide FirstName LastName and bio for the user";

/// Message returned when the path identifier is not a UUID
pub const INVALID_ID_MESSAGE: &str = "UUID not valid";

/// Message returned when no user has the requested identifier
pub const NOT_FOUND_MESSAGE: &str = "The user with the specified ID does not exist.";

/// Message returned when a response cannot be produced
pub const INTERNAL_MESSAGE: &str = "something went wrong";

/// Failures reported to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body is not a decodable user
    #[error("invalid request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Request body could not be read: too large, or it stalled past the
    /// read timeout
    #[error("unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    /// Path segment is not a valid identifier
    #[error("invalid user id '{raw}': {source}")]
    InvalidId {
        raw: String,
        #[source]
        source: uuid::Error,
    },

    /// No user with this identifier
    #[error("user not found")]
    NotFound,
}

impl ApiError {
    /// Status code this error is reported with
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(..) | ApiError::InvalidId { .. } => StatusCode::BAD_REQUEST,
            ApiError::UnreadableBody(rejection)
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            ApiError::UnreadableBody(..) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::InvalidBody(e) => {
                tracing::debug!("Rejecting undecodable body: {}", e);
                send_json(status, &Envelope::<()>::error(INVALID_BODY_MESSAGE))
            }
            ApiError::UnreadableBody(rejection) if status == StatusCode::PAYLOAD_TOO_LARGE => {
                rejection.into_response()
            }
            ApiError::UnreadableBody(rejection) => {
                tracing::debug!("Failed to read request body: {}", rejection);
                send_json(status, &Envelope::<()>::error(INVALID_BODY_MESSAGE))
            }
            ApiError::InvalidId { raw, source } => {
                tracing::debug!("Rejecting invalid user id {:?}: {}", raw, source);
                (status, INVALID_ID_MESSAGE).into_response()
            }
            ApiError::NotFound => send_json(status, &Envelope::<()>::error(NOT_FOUND_MESSAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_invalid_body_response() {
        let json_error = serde_json::from_str::<crate::types::User>("{").unwrap_err();
        let response = ApiError::InvalidBody(json_error).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(
            body_string(response).await,
            r#"{"error":"Please provide FirstName LastName and bio for the user"}"#
        );
    }

    #[tokio::test]
    async fn test_invalid_id_is_plain_text() {
        let source = "nope".parse::<uuid::Uuid>().unwrap_err();
        let response = ApiError::InvalidId {
            raw: "nope".to_string(),
            source,
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(
            response.headers()[CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/plain")
        );
        assert_eq!(body_string(response).await, "UUID not valid");
    }

    #[tokio::test]
    async fn test_not_found_response() {
        let response = ApiError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_string(response).await,
            r#"{"error":"The user with the specified ID does not exist."}"#
        );
    }
}
