//! Shared application state.

use std::sync::Arc;

use textlens_core::TextLensConfig;
use textlens_engine::AnalysisEngine;
use textlens_llm::LlmClient;
use textlens_store::AnalysisStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TextLensConfig,
    pub store: Arc<AnalysisStore>,
    pub llm: Arc<LlmClient>,
    pub engine: AnalysisEngine,
}
