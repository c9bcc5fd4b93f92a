//! Keyword extraction — top common nouns by frequency, with a plain
//! word-frequency fallback when no lexicon is loaded.

use std::collections::HashMap;

use crate::lexicon::{Lexicon, PosTag};

/// Maximum number of keywords returned per input.
pub const MAX_KEYWORDS: usize = 3;

/// Fallback tokens of this length or shorter are discarded (articles,
/// prepositions, and similar filler).
const MIN_FALLBACK_WORD_LEN: usize = 3;

/// Deterministic keyword extractor, safe for concurrent read-only use.
pub struct KeywordExtractor {
    lexicon: Option<Lexicon>,
}

impl KeywordExtractor {
    pub fn with_lexicon(lexicon: Lexicon) -> Self {
        Self {
            lexicon: Some(lexicon),
        }
    }

    /// Word-frequency mode, used when no lexicon could be loaded.
    pub fn fallback() -> Self {
        Self { lexicon: None }
    }

    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    /// Extract up to 3 keywords, most frequent first. Ties keep the order in
    /// which the words first appeared in the text.
    pub fn extract(&self, text: &str) -> Vec<String> {
        match &self.lexicon {
            Some(lex) => extract_nouns(lex, text),
            None => extract_frequent_words(text),
        }
    }
}

fn extract_nouns(lexicon: &Lexicon, text: &str) -> Vec<String> {
    rank_top(tokenize(text).filter_map(|token| {
        let lower = token.to_lowercase();
        (lexicon.tag(&lower) == Some(PosTag::Noun)).then_some(lower)
    }))
}

fn extract_frequent_words(text: &str) -> Vec<String> {
    rank_top(text.split_whitespace().filter_map(|word| {
        let clean: String = word
            .chars()
            .filter(|c| c.is_alphabetic())
            .flat_map(|c| c.to_lowercase())
            .collect();
        (clean.len() > MIN_FALLBACK_WORD_LEN).then_some(clean)
    }))
}

/// Split on whitespace and punctuation.
fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| c.is_whitespace() || ",.;:!?()[]{}\"'/\\".contains(c))
        .filter(|w| !w.is_empty())
}

/// Count occurrences and return the most frequent words. The sort is stable
/// over first-appearance order, so equal counts resolve to whichever word
/// showed up earlier.
fn rank_top(words: impl Iterator<Item = String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for word in words {
        let count = counts.entry(word.clone()).or_insert(0);
        if *count == 0 {
            order.push(word);
        }
        *count += 1;
    }

    let mut ranked: Vec<(String, usize)> = order
        .into_iter()
        .map(|w| {
            let count = counts[&w];
            (w, count)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(MAX_KEYWORDS)
        .map(|(w, _)| w)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noun_lexicon() -> Lexicon {
        Lexicon::parse(
            "intelligence\tNN\nhealthcare\tNN\nindustry\tNN\npatients\tNNS\n\
             transforming\tVBG\nartificial\tJJ\nis\tVBZ\nthe\tDT\n",
        )
    }

    #[test]
    fn test_lexicon_extraction_selects_nouns() {
        let extractor = KeywordExtractor::with_lexicon(noun_lexicon());
        let keywords =
            extractor.extract("Artificial intelligence is transforming the healthcare industry.");
        assert_eq!(keywords, vec!["intelligence", "healthcare", "industry"]);
    }

    #[test]
    fn test_lexicon_extraction_counts_case_insensitively() {
        let extractor = KeywordExtractor::with_lexicon(noun_lexicon());
        let keywords = extractor.extract("Industry, industry, INDUSTRY! Healthcare patients.");
        assert_eq!(keywords[0], "industry");
        assert_eq!(keywords.len(), 3);
    }

    #[test]
    fn test_fallback_frequency_ordering() {
        let extractor = KeywordExtractor::fallback();
        let keywords = extractor.extract("data data data model model training extra words");
        assert_eq!(keywords, vec!["data", "model", "training"]);
    }

    #[test]
    fn test_fallback_ties_keep_first_seen_order() {
        let extractor = KeywordExtractor::fallback();
        let keywords = extractor.extract("alpha beta gamma delta");
        assert_eq!(keywords, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn test_fallback_strips_punctuation_and_short_words() {
        let extractor = KeywordExtractor::fallback();
        let keywords = extractor.extract("The cat sat on a mat! (Really?) healthcare, healthcare.");
        assert_eq!(keywords[0], "healthcare");
        assert!(!keywords.iter().any(|k| k == "cat" || k == "mat" || k == "the"));
    }

    #[test]
    fn test_fallback_empty_when_no_long_alphabetic_tokens() {
        let extractor = KeywordExtractor::fallback();
        assert!(extractor.extract("a an 123 !!! it is").is_empty());
        assert!(extractor.extract("").is_empty());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = KeywordExtractor::fallback();
        let text = "stream stream engine engine analysis";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_never_more_than_three() {
        let extractor = KeywordExtractor::fallback();
        let keywords = extractor.extract("apple banana cherry durian elderberry figleaf");
        assert_eq!(keywords.len(), MAX_KEYWORDS);
    }
}
