//! Analysis routes — /api/v1/analyze, /api/v1/search, /api/v1/analyses.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{error, warn};

use textlens_core::Error;
use textlens_engine::SearchQuery;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze", post(analyze_text))
        .route("/search", get(search_analyses))
        .route("/analyses", get(list_analyses))
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub topic: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> impl IntoResponse {
    // Validation happens here, before the engine is ever invoked.
    if req.text.trim().is_empty() {
        warn!("Received empty text input");
        return error_response(Error::Validation("Input text cannot be empty.".into()))
            .into_response();
    }

    match state.engine.perform_analysis(&req.text).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

async fn search_analyses(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let query = SearchQuery::new(params.topic, params.limit, params.offset);
    match state.engine.search_analyses(&query).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// List recent analyses with default pagination.
async fn list_analyses(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.engine.search_analyses(&SearchQuery::default()).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => error_response(e).into_response(),
    }
}

/// Map an engine failure to its HTTP shape. Raw detail is logged
/// server-side; response bodies carry only a generic message.
fn error_response(err: Error) -> (StatusCode, Json<serde_json::Value>) {
    match err {
        Error::Validation(message) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "message": message })),
        ),
        Error::LlmUnavailable(detail) => {
            error!("LLM unavailable: {}", detail);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({
                    "message": "AI analysis service is temporarily unavailable. Please try again later."
                })),
            )
        }
        Error::PersistenceUnavailable(detail) => {
            error!("Datastore failure: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Database temporarily unavailable. Please try again."
                })),
            )
        }
        other => {
            error!("Analysis failed: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "message": "Text analysis failed. Please try again."
                })),
            )
        }
    }
}
