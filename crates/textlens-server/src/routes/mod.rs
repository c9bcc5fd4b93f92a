//! HTTP route handlers.

pub mod analysis;
pub mod status;

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .nest("/api/v1", api_routes())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(analysis::routes())
        .merge(status::routes())
}

/// Liveness probe.
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Server is running" }))
}
