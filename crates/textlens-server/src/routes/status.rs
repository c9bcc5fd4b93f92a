//! Service status route.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/status", get(get_status))
}

async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let record_count = state.store.count().ok();

    Json(serde_json::json!({
        "llmMode": if state.llm.is_mock() { "mock" } else { "live" },
        "llmModel": state.llm.model_name(),
        "storeAvailable": record_count.is_some(),
        "recordCount": record_count,
    }))
}
