//! Configuration and data directory management.

use std::path::{Path, PathBuf};

/// Paths to all TextLens data directories.
#[derive(Debug, Clone)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Analysis database directory (`data/db/`).
    pub db: PathBuf,
    /// Linguistic model directory (`data/models/`).
    pub models: PathBuf,
}

impl DataPaths {
    /// Create data paths from a root directory. Creates directories if needed.
    pub fn new(root: impl AsRef<Path>) -> std::io::Result<Self> {
        let root = root.as_ref().to_path_buf();
        let paths = Self {
            db: root.join("db"),
            models: root.join("models"),
            root,
        };
        paths.ensure_dirs()?;
        Ok(paths)
    }

    fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.db)?;
        std::fs::create_dir_all(&self.models)?;
        Ok(())
    }
}

/// Generation and transport settings for the external LLM.
#[derive(Debug, Clone)]
pub struct LlmSettings {
    /// API credential for the live provider; unused in mock mode.
    pub api_key: Option<String>,
    /// Model identifier sent with live requests.
    pub model: String,
    /// Substitute the fixed deterministic response for every call.
    pub mock_enabled: bool,
    pub max_tokens: usize,
    pub temperature: f64,
    /// Hard ceiling on a single streaming round trip, in seconds.
    pub timeout_secs: u64,
}

/// Top-level TextLens configuration.
///
/// Loaded once at process start; immutable thereafter.
#[derive(Debug, Clone)]
pub struct TextLensConfig {
    /// HTTP server port.
    pub port: u16,
    /// Data directory paths.
    pub data_paths: DataPaths,
    /// LLM client settings.
    pub llm: LlmSettings,
}

impl TextLensConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env(data_dir: impl AsRef<Path>) -> std::io::Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3001);

        let data_paths = DataPaths::new(data_dir)?;

        let llm = LlmSettings {
            api_key: std::env::var("LLM_API_KEY").ok().filter(|k| !k.is_empty()),
            model: std::env::var("LLM_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
            mock_enabled: std::env::var("LLM_MOCK_ENABLED")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            max_tokens: std::env::var("LLM_MAX_TOKENS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(512),
            temperature: std::env::var("LLM_TEMPERATURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0.2),
            timeout_secs: std::env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
        };

        Ok(Self {
            port,
            data_paths,
            llm,
        })
    }
}
