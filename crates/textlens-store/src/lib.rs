//! TextLens Store — SQLite persistence for analysis records.

pub mod store;
pub mod types;

pub use store::{AnalysisStore, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
pub use types::{Analysis, NewAnalysis};
