//! Axum application setup
//!
//! Creates and configures the Axum application with routes and middleware.

use crate::{
    config::Settings,
    store::{InMemoryUserStore, UserRepository},
};
use super::response::panic_response;
use axum::{Router, extract::DefaultBodyLimit, http::StatusCode, routing::get};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// User storage
    pub store: Arc<dyn UserRepository>,
}

/// Create the application backed by a fresh, empty in-memory store
pub fn create_app(settings: &Settings) -> Router {
    create_app_with_store(settings, Arc::new(InMemoryUserStore::new()))
}

/// Create the application backed by `store`
pub fn create_app_with_store(settings: &Settings, store: Arc<dyn UserRepository>) -> Router {
    let state = AppState { store };

    let api = Router::new()
        .route(
            "/users",
            get(super::handlers::list_users).post(super::handlers::create_user),
        )
        .route(
            "/users/{id}",
            get(super::handlers::get_user)
                .put(super::handlers::update_user)
                .delete(super::handlers::delete_user),
        );

    let router = Router::new()
        .nest("/api", api)
        .fallback(super::handlers::not_found)
        .layer(DefaultBodyLimit::max(settings.server.max_body_size))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CatchPanicLayer::custom(panic_response))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    settings.server.write_timeout,
                ))
                .layer(RequestBodyTimeoutLayer::new(settings.server.read_timeout)),
        );

    let router = if settings.server.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.with_state(state)
}
