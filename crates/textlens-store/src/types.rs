//! Persisted analysis records.

use serde::{Deserialize, Serialize};
use textlens_core::Sentiment;

/// A record ready for persistence: everything except the store-assigned
/// `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewAnalysis {
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub summary: String,
    pub original_text: Option<String>,
    pub confidence_score: Option<f64>,
}

/// A persisted analysis. Immutable once written; the store has no update or
/// delete operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub title: Option<String>,
    pub topics: Vec<String>,
    pub sentiment: Sentiment,
    pub keywords: Vec<String>,
    pub summary: String,
    pub original_text: Option<String>,
    pub confidence_score: Option<f64>,
    /// RFC 3339 creation timestamp, assigned at insert.
    #[serde(rename = "createdAt")]
    pub created_at: String,
}
