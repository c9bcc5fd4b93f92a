//! Prompt construction for the knowledge-extraction call.

use serde_json::json;

/// System instruction mandating a strict JSON response shape.
pub const KNOWLEDGE_EXTRACTION_PROMPT: &str = "You are a knowledge extractor. \
You will receive a block of text and must return a JSON object. \
The JSON must have these keys: 'summary', 'title', 'topics', and 'sentiment'. \
The summary should be 1-2 sentences. \
The title should be extracted from the text if available (or null if none). \
The topics array should contain 3 key topics from the text. \
The sentiment must be one of 'positive', 'neutral', or 'negative'. \
Return only the raw JSON, without any other commentary.";

/// Build the message array for the analysis request.
pub fn analysis_messages(text: &str) -> Vec<serde_json::Value> {
    vec![
        json!({"role": "system", "content": KNOWLEDGE_EXTRACTION_PROMPT}),
        json!({"role": "user", "content": text}),
    ]
}
