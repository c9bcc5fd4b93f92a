//! TextLens — text-analysis backend server.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;

fn resolve_data_dir() -> PathBuf {
    std::env::var("TEXTLENS_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    // Initialize configuration
    let config = textlens_core::TextLensConfig::from_env(&data_dir)?;
    let port = config.port;

    // Initialize store
    let store = Arc::new(
        textlens_store::AnalysisStore::open(&config.data_paths.db)
            .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?,
    );

    // Initialize keyword extractor (lexicon if available, otherwise fallback)
    let extractor = textlens_extract::create_extractor(&config.data_paths.models).await;

    // Initialize LLM client
    let llm = Arc::new(
        textlens_llm::LlmClient::from_settings(&config.llm)
            .map_err(|e| anyhow::anyhow!("LLM configuration invalid: {}", e))?,
    );
    if llm.is_mock() {
        info!("LLM mock mode enabled");
    } else {
        info!("LLM live mode: model {}", llm.model_name());
    }

    // Build the engine and application state
    let engine = textlens_engine::AnalysisEngine::new(
        store.clone(),
        llm.clone(),
        extractor,
        Duration::from_secs(config.llm.timeout_secs),
    );
    let state = Arc::new(AppState {
        config,
        store,
        llm,
        engine,
    });

    // Build router
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("TextLens server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
