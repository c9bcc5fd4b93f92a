//! API parity tests — validates that response shapes match what API
//! consumers expect, field names included.

use textlens_core::Sentiment;
use textlens_store::Analysis;

fn sample_analysis() -> Analysis {
    Analysis {
        id: 42,
        title: Some("A Title".into()),
        topics: vec!["ai".into(), "health".into(), "industry".into()],
        sentiment: Sentiment::Neutral,
        keywords: vec!["intelligence".into(), "healthcare".into()],
        summary: "Two sentences about the text.".into(),
        original_text: Some("the raw input".into()),
        confidence_score: Some(87.5),
        created_at: "2026-08-07T12:00:00+00:00".into(),
    }
}

/// The analysis record must serialize with the historical field names,
/// including camelCase `createdAt` next to snake_case everything else.
#[test]
fn test_analysis_response_shape() {
    let value = serde_json::to_value(sample_analysis()).unwrap();

    assert!(value["id"].is_number());
    assert!(value["title"].is_string());
    assert!(value["topics"].is_array());
    assert_eq!(value["sentiment"], "neutral");
    assert!(value["keywords"].is_array());
    assert!(value["summary"].is_string());
    assert!(value["original_text"].is_string());
    assert!(value["confidence_score"].is_number());
    assert!(value["createdAt"].is_string());

    // The snake_case spelling must not leak alongside the camelCase one.
    assert!(value.get("created_at").is_none());
}

/// Nullable fields serialize as explicit nulls, not missing keys.
#[test]
fn test_analysis_nullable_fields_stay_present() {
    let mut analysis = sample_analysis();
    analysis.title = None;
    analysis.original_text = None;
    analysis.confidence_score = None;

    let value = serde_json::to_value(analysis).unwrap();
    assert!(value["title"].is_null());
    assert!(value["original_text"].is_null());
    assert!(value["confidence_score"].is_null());
    assert!(value.as_object().unwrap().contains_key("title"));
}

/// A search response is a bare JSON array of analysis records.
#[test]
fn test_search_response_shape() {
    let results = vec![sample_analysis(), sample_analysis()];
    let value = serde_json::to_value(results).unwrap();

    assert!(value.is_array());
    assert_eq!(value.as_array().unwrap().len(), 2);
    assert!(value[0]["createdAt"].is_string());
}

/// Error bodies carry a single generic message field.
#[test]
fn test_error_body_shape() {
    let body = serde_json::json!({ "message": "Input text cannot be empty." });
    assert!(body["message"].is_string());
    assert_eq!(body.as_object().unwrap().len(), 1);
}

/// Liveness probe payload.
#[test]
fn test_liveness_shape() {
    let body = serde_json::json!({ "message": "Server is running" });
    assert_eq!(body["message"], "Server is running");
}

/// Status payload shape.
#[test]
fn test_status_shape() {
    let status = serde_json::json!({
        "llmMode": "mock",
        "llmModel": "mock_model",
        "storeAvailable": true,
        "recordCount": 3,
    });

    assert!(status["llmMode"].is_string());
    assert!(status["llmModel"].is_string());
    assert!(status["storeAvailable"].is_boolean());
    assert!(status["recordCount"].is_number());
}

/// Round-trip: a serialized record deserializes back unchanged.
#[test]
fn test_analysis_roundtrip() {
    let original = sample_analysis();
    let json = serde_json::to_string(&original).unwrap();
    let back: Analysis = serde_json::from_str(&json).unwrap();

    assert_eq!(back.id, original.id);
    assert_eq!(back.topics, original.topics);
    assert_eq!(back.sentiment, original.sentiment);
    assert_eq!(back.created_at, original.created_at);
}
