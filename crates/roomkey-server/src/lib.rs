//! roomkey server library logic.

pub mod api;
pub mod config;

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Extension, Json, Router,
};
use roomkey_token::TokenService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Issues rooms and participant tokens.
    pub token_service: Arc<TokenService>,
}

impl AppState {
    pub fn new(token_service: TokenService) -> Self {
        Self {
            token_service: Arc::new(token_service),
        }
    }
}

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
pub fn app(state: AppState) -> Router {
    // Connection details are single-use; success and error responses alike
    // must never be cached by intermediaries.
    let token_routes = Router::new()
        .route(
            "/api/connection-details",
            get(api::connection_details_handler),
        )
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .route("/health", get(health))
        .merge(token_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
