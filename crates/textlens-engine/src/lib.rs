//! TextLens Engine — the analysis orchestration pipeline.

pub mod engine;
pub mod types;

pub use engine::AnalysisEngine;
pub use types::SearchQuery;
