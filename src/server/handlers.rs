//! HTTP request handlers
//!
//! One handler per user endpoint. Each parses the request, calls the
//! repository and maps the outcome to a status code.

use crate::{
    error::ApiError,
    server::{app::AppState, response::send_json},
    types::{Envelope, User, UserId, UserResponse},
};
use axum::{
    body::Bytes,
    extract::{Path, State, rejection::BytesRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

fn parse_id(raw: &str) -> Result<UserId, ApiError> {
    raw.parse().map_err(|source| ApiError::InvalidId {
        raw: raw.to_string(),
        source,
    })
}

/// Decode the first JSON value in the body; anything after it is ignored
fn decode_user(body: Result<Bytes, BytesRejection>) -> Result<User, ApiError> {
    let body = body?;
    let mut deserializer = serde_json::Deserializer::from_slice(&body);
    User::deserialize(&mut deserializer).map_err(ApiError::InvalidBody)
}

/// Create user endpoint
///
/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let user = decode_user(body)?;
    let (id, user) = state.store.insert(user).await;

    tracing::info!("Created user {}", id);
    Ok(send_json(
        StatusCode::CREATED,
        &Envelope::data(UserResponse::new(id, user)),
    ))
}

/// List users endpoint
///
/// GET /api/users
///
/// Always answers with an array, empty when the store is.
pub async fn list_users(State(state): State<AppState>) -> Response {
    let users: Vec<UserResponse> = state
        .store
        .find_all()
        .await
        .into_iter()
        .map(|(id, user)| UserResponse::new(id, user))
        .collect();

    tracing::debug!("Listing {} user(s)", users.len());
    send_json(StatusCode::OK, &Envelope::data(users))
}

/// Fetch user endpoint
///
/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&raw_id)?;
    let user = state.store.find_by_id(id).await.ok_or(ApiError::NotFound)?;

    Ok(send_json(
        StatusCode::OK,
        &Envelope::data(UserResponse::new(id, user)),
    ))
}

/// Replace user endpoint
///
/// PUT /api/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Result<Bytes, BytesRejection>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;
    let user = decode_user(body)?;

    if !state.store.update(id, user).await {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Updated user {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Delete user endpoint
///
/// DELETE /api/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;

    if !state.store.delete(id).await {
        return Err(ApiError::NotFound);
    }

    tracing::info!("Deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404 page not found")
}
