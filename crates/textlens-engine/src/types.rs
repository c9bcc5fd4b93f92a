//! Engine request types.

use textlens_store::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};

/// Search parameters with API defaults and bounds applied.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub topic: Option<String>,
    pub limit: usize,
    pub offset: usize,
}

impl SearchQuery {
    /// Apply defaults: limit 50 clamped to [1, 200], offset 0.
    pub fn new(topic: Option<String>, limit: Option<usize>, offset: Option<usize>) -> Self {
        Self {
            topic,
            limit: limit.unwrap_or(DEFAULT_SEARCH_LIMIT).clamp(1, MAX_SEARCH_LIMIT),
            offset: offset.unwrap_or(0),
        }
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(None, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let q = SearchQuery::default();
        assert!(q.topic.is_none());
        assert_eq!(q.limit, 50);
        assert_eq!(q.offset, 0);
    }

    #[test]
    fn test_limit_bounds() {
        assert_eq!(SearchQuery::new(None, Some(0), None).limit, 1);
        assert_eq!(SearchQuery::new(None, Some(500), None).limit, 200);
        assert_eq!(SearchQuery::new(None, Some(25), Some(10)).limit, 25);
    }
}
