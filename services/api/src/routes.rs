//! API service routes

use axum::{Json, Router, middleware, response::IntoResponse, routing::get};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::{auth_middleware, require_admin},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod employee;

/// Create the router for the API service
///
/// Everything under `/api` requires a bearer access token; `/api/admin`
/// additionally requires the admin role.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = admin::router().route_layer(middleware::from_fn(require_admin));

    let api_routes = Router::new()
        .nest("/admin", admin_routes)
        .nest("/employees", employee::router())
        .nest("/auth", auth::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "staffdesk-api"
    }))
}
