//! TextLens Core — error taxonomy, configuration, shared domain types.

pub mod config;
pub mod error;
pub mod types;

pub use config::{DataPaths, LlmSettings, TextLensConfig};
pub use error::{Error, Result};
pub use types::Sentiment;
