//! LLM client types.

use serde::{Deserialize, Serialize};
use textlens_core::Sentiment;

/// A single streamed piece of the analysis response.
pub enum StreamChunk {
    /// Content delta plus the log-probabilities of any tokens it carried.
    Fragment {
        content: String,
        logprobs: Vec<f64>,
    },
    /// Upstream stream exhausted.
    Done,
    /// Transport, protocol, or stream-read failure.
    Error(String),
}

/// The JSON document the model is instructed to return.
///
/// Every field defaults so a sparse response still assembles into a record:
/// missing summary becomes empty, missing topics an empty list, missing
/// sentiment `unknown`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmAnalysis {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub sentiment: Sentiment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sparse_document_defaults() {
        let parsed: LlmAnalysis = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.summary, "");
        assert!(parsed.title.is_none());
        assert!(parsed.topics.is_empty());
        assert_eq!(parsed.sentiment, Sentiment::Unknown);
    }

    #[test]
    fn test_full_document_parses() {
        let parsed: LlmAnalysis = serde_json::from_str(
            r#"{"summary":"s","title":"t","topics":["a","b","c"],"sentiment":"positive"}"#,
        )
        .unwrap();
        assert_eq!(parsed.title.as_deref(), Some("t"));
        assert_eq!(parsed.topics.len(), 3);
        assert_eq!(parsed.sentiment, Sentiment::Positive);
    }

    #[test]
    fn test_non_object_payload_is_an_error() {
        assert!(serde_json::from_str::<LlmAnalysis>("[1, 2]").is_err());
        assert!(serde_json::from_str::<LlmAnalysis>("not json").is_err());
    }
}
