//! Analysis engine — drives the LLM stream, keyword extraction, confidence
//! scoring, and persistence for a single request.
//!
//! Persistence happens only after the full record is assembled, so a
//! failure anywhere earlier leaves nothing behind to clean up.

use std::sync::Arc;
use std::time::Duration;

use tokio_stream::StreamExt;
use tracing::{error, info, warn};

use textlens_core::{Error, Result};
use textlens_extract::KeywordExtractor;
use textlens_llm::{confidence, LlmAnalysis, LlmClient, StreamChunk};
use textlens_store::{Analysis, AnalysisStore, NewAnalysis};

use crate::types::SearchQuery;

/// Coordinates the LLM client, keyword extractor, and store. All
/// collaborators are injected; the engine holds no other state.
pub struct AnalysisEngine {
    store: Arc<AnalysisStore>,
    llm: Arc<LlmClient>,
    extractor: Arc<KeywordExtractor>,
    llm_timeout: Duration,
}

impl AnalysisEngine {
    pub fn new(
        store: Arc<AnalysisStore>,
        llm: Arc<LlmClient>,
        extractor: Arc<KeywordExtractor>,
        llm_timeout: Duration,
    ) -> Self {
        Self {
            store,
            llm,
            extractor,
            llm_timeout,
        }
    }

    /// Run the full analysis pipeline for `text` and persist the result.
    ///
    /// `text` must already be validated non-blank by the caller.
    pub async fn perform_analysis(&self, text: &str) -> Result<Analysis> {
        info!("Starting analysis for input text");

        // Keyword extraction is CPU-bound and independent of the LLM output,
        // so it runs on the blocking pool while the stream is collected.
        let extractor = self.extractor.clone();
        let input = text.to_string();
        let keywords_task = tokio::task::spawn_blocking(move || extractor.extract(&input));

        let (content, logprobs) = self.collect_stream(text).await?;

        let output: LlmAnalysis = serde_json::from_str(&content).map_err(|e| {
            error!("Failed to parse LLM JSON: {}", e);
            Error::LlmUnavailable(format!("unparsable model response: {}", e))
        })?;

        let confidence_score = confidence::score_from_logprobs(&logprobs);

        let keywords = keywords_task
            .await
            .map_err(|e| Error::Internal(format!("keyword extraction task failed: {}", e)))?;

        let record = NewAnalysis {
            title: output.title,
            topics: output.topics,
            sentiment: output.sentiment,
            keywords,
            summary: output.summary,
            original_text: Some(text.to_string()),
            confidence_score,
        };

        let analysis = self.store.create(&record)?;
        info!(
            "Saved analysis {} ({} topics, {} keywords)",
            analysis.id,
            analysis.topics.len(),
            analysis.keywords.len()
        );
        Ok(analysis)
    }

    /// Consume the LLM stream until it ends, accumulating content and
    /// log-probabilities. Stream errors and the timeout both surface as
    /// `LlmUnavailable`.
    async fn collect_stream(&self, text: &str) -> Result<(String, Vec<f64>)> {
        let collect = async {
            let mut stream = self.llm.stream_analysis(text);
            let mut content = String::new();
            let mut logprobs = Vec::new();

            while let Some(chunk) = stream.next().await {
                match chunk {
                    StreamChunk::Fragment {
                        content: delta,
                        logprobs: token_logprobs,
                    } => {
                        content.push_str(&delta);
                        logprobs.extend(token_logprobs);
                    }
                    StreamChunk::Done => break,
                    StreamChunk::Error(e) => {
                        error!("LLM streaming failed: {}", e);
                        return Err(Error::LlmUnavailable(e));
                    }
                }
            }

            Ok((content, logprobs))
        };

        match tokio::time::timeout(self.llm_timeout, collect).await {
            Ok(result) => result,
            Err(_) => {
                warn!("LLM stream timed out after {:?}", self.llm_timeout);
                Err(Error::LlmUnavailable("stream timed out".into()))
            }
        }
    }

    /// Search persisted analyses. A blank or absent topic returns
    /// everything, newest first.
    pub async fn search_analyses(&self, query: &SearchQuery) -> Result<Vec<Analysis>> {
        match query.topic.as_deref().map(str::trim) {
            Some(topic) if !topic.is_empty() => {
                info!("Searching analyses for topic '{}'", topic);
                self.store.search(topic, query.limit, query.offset)
            }
            _ => self.store.find_recent(query.limit, query.offset),
        }
    }
}
