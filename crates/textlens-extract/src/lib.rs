//! TextLens Extract — local, CPU-bound keyword extraction.
//!
//! The primary path tags tokens with a part-of-speech lexicon and keeps the
//! most frequent common nouns. When no lexicon can be loaded the extractor
//! falls back to plain word-frequency selection.

pub mod extractor;
pub mod lexicon;

pub use extractor::{KeywordExtractor, MAX_KEYWORDS};
pub use lexicon::Lexicon;

use std::path::Path;
use std::sync::Arc;

/// Create the best available keyword extractor for the given model directory.
///
/// Tries the bundled lexicon first, then a one-time download, then a
/// pre-existing system installation. Falls back to word-frequency
/// extraction; never fails.
pub async fn create_extractor(model_dir: &Path) -> Arc<KeywordExtractor> {
    match lexicon::load_lexicon(model_dir).await {
        Some(lex) => {
            tracing::info!("Using lexicon-based extraction ({} entries)", lex.len());
            Arc::new(KeywordExtractor::with_lexicon(lex))
        }
        None => {
            tracing::warn!("POS lexicon unavailable. Falling back to word-frequency extraction.");
            Arc::new(KeywordExtractor::fallback())
        }
    }
}
