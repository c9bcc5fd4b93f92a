//! Streaming LLM client for the analysis call.
//!
//! Live mode streams SSE chunks from the OpenAI chat-completions endpoint
//! with `logprobs` enabled, yielding content deltas and their token
//! log-probabilities as they arrive. The stream is restartable per call and
//! finite; it ends with `Done` or a single `Error`.

use std::pin::Pin;

use futures::Stream;
use reqwest::Client;
use serde_json::json;
use tokio_stream::StreamExt;
use tracing::{debug, info};

use textlens_core::{Error, LlmSettings, Result};

use crate::prompt::analysis_messages;
use crate::types::StreamChunk;

/// Boxed stream type for returning different stream implementations.
pub type BoxedStream = Pin<Box<dyn Stream<Item = StreamChunk> + Send>>;

const OPENAI_CHAT_URL: &str = "https://api.openai.com/v1/chat/completions";

enum Mode {
    Mock,
    Canned {
        content: String,
        logprobs: Vec<f64>,
    },
    Live {
        api_key: String,
        model: String,
        max_tokens: usize,
        temperature: f64,
    },
}

pub struct LlmClient {
    mode: Mode,
    http: Client,
}

impl LlmClient {
    /// Deterministic client yielding a fixed, valid analysis document.
    pub fn mock() -> Self {
        Self {
            mode: Mode::Mock,
            http: Client::new(),
        }
    }

    /// Deterministic client yielding an arbitrary payload. Lets tests drive
    /// the consumer with malformed documents or chosen log-probabilities.
    pub fn canned(content: impl Into<String>, logprobs: Vec<f64>) -> Self {
        Self {
            mode: Mode::Canned {
                content: content.into(),
                logprobs,
            },
            http: Client::new(),
        }
    }

    pub fn live(api_key: String, model: String, max_tokens: usize, temperature: f64) -> Self {
        Self {
            mode: Mode::Live {
                api_key,
                model,
                max_tokens,
                temperature,
            },
            http: Client::new(),
        }
    }

    /// Build a client from process configuration. Mock mode wins; live mode
    /// requires a credential.
    pub fn from_settings(settings: &LlmSettings) -> Result<Self> {
        if settings.mock_enabled {
            return Ok(Self::mock());
        }
        match &settings.api_key {
            Some(key) => Ok(Self::live(
                key.clone(),
                settings.model.clone(),
                settings.max_tokens,
                settings.temperature,
            )),
            None => Err(Error::Config(
                "LLM_API_KEY is required when mock mode is disabled".into(),
            )),
        }
    }

    pub fn is_mock(&self) -> bool {
        !matches!(self.mode, Mode::Live { .. })
    }

    pub fn model_name(&self) -> &str {
        match &self.mode {
            Mode::Live { model, .. } => model,
            _ => "mock_model",
        }
    }

    /// Stream the analysis for `text`.
    pub fn stream_analysis(&self, text: &str) -> BoxedStream {
        match &self.mode {
            Mode::Mock => {
                info!("Using mock LLM response");
                canned_stream(mock_document(), Vec::new())
            }
            Mode::Canned { content, logprobs } => {
                canned_stream(content.clone(), logprobs.clone())
            }
            Mode::Live {
                api_key,
                model,
                max_tokens,
                temperature,
            } => Box::pin(stream_openai(
                self.http.clone(),
                api_key.clone(),
                model.clone(),
                *max_tokens,
                *temperature,
                text.to_string(),
            )),
        }
    }
}

/// The fixed document yielded in mock mode.
fn mock_document() -> String {
    json!({
        "summary": "This is a mock summary of the provided text, used for testing and development purposes. It simulates a fast, perfect response.",
        "title": "Mock Analysis Title",
        "topics": ["mocking", "testing", "development"],
        "sentiment": "neutral",
    })
    .to_string()
}

fn canned_stream(content: String, logprobs: Vec<f64>) -> BoxedStream {
    Box::pin(async_stream::stream! {
        yield StreamChunk::Fragment { content, logprobs };
        yield StreamChunk::Done;
    })
}

/// Stream the analysis from the OpenAI chat-completions SSE endpoint.
fn stream_openai(
    client: Client,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
    text: String,
) -> impl Stream<Item = StreamChunk> + Send + 'static {
    async_stream::stream! {
        let body = json!({
            "model": model,
            "messages": analysis_messages(&text),
            "temperature": temperature,
            "max_tokens": max_tokens,
            "stream": true,
            "logprobs": true,
            "response_format": {"type": "json_object"},
        });

        debug!("Requesting analysis from {} with model {}", OPENAI_CHAT_URL, model);

        let response = match client
            .post(OPENAI_CHAT_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                yield StreamChunk::Error(format!("Request failed: {}", e));
                return;
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            yield StreamChunk::Error(format!("API error {}: {}", status, body));
            return;
        }

        let mut stream = response.bytes_stream();
        let mut buffer = String::new();

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    yield StreamChunk::Error(format!("Stream read error: {}", e));
                    return;
                }
            };

            buffer.push_str(&String::from_utf8_lossy(&bytes));

            // Process complete SSE lines
            while let Some(line_end) = buffer.find('\n') {
                let line = buffer[..line_end].trim().to_string();
                buffer = buffer[line_end + 1..].to_string();

                if line.is_empty() || line.starts_with(':') {
                    continue;
                }

                if let Some(data) = line.strip_prefix("data: ") {
                    if data.trim() == "[DONE]" {
                        yield StreamChunk::Done;
                        return;
                    }

                    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(data) {
                        let choice = &parsed["choices"][0];

                        let content = choice["delta"]["content"]
                            .as_str()
                            .unwrap_or_default()
                            .to_string();

                        let mut logprobs = Vec::new();
                        if let Some(entries) = choice["logprobs"]["content"].as_array() {
                            for entry in entries {
                                if let Some(lp) = entry["logprob"].as_f64() {
                                    logprobs.push(lp);
                                }
                            }
                        }

                        if !content.is_empty() || !logprobs.is_empty() {
                            yield StreamChunk::Fragment { content, logprobs };
                        }
                    }
                }
            }
        }

        yield StreamChunk::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LlmAnalysis;
    use textlens_core::Sentiment;
    use tokio_stream::StreamExt;

    async fn collect(client: &LlmClient, text: &str) -> (String, Vec<f64>) {
        let mut stream = client.stream_analysis(text);
        let mut content = String::new();
        let mut logprobs = Vec::new();
        while let Some(chunk) = stream.next().await {
            match chunk {
                StreamChunk::Fragment {
                    content: c,
                    logprobs: lp,
                } => {
                    content.push_str(&c);
                    logprobs.extend(lp);
                }
                StreamChunk::Done => break,
                StreamChunk::Error(e) => panic!("unexpected stream error: {}", e),
            }
        }
        (content, logprobs)
    }

    #[tokio::test]
    async fn test_mock_stream_is_one_valid_document() {
        let client = LlmClient::mock();
        let (content, logprobs) = collect(&client, "anything").await;

        assert!(logprobs.is_empty());
        let parsed: LlmAnalysis = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.title.as_deref(), Some("Mock Analysis Title"));
        assert_eq!(parsed.topics, vec!["mocking", "testing", "development"]);
        assert_eq!(parsed.sentiment, Sentiment::Neutral);
        assert!(!parsed.summary.is_empty());
    }

    #[tokio::test]
    async fn test_mock_stream_is_restartable() {
        let client = LlmClient::mock();
        let (first, _) = collect(&client, "a").await;
        let (second, _) = collect(&client, "a").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_canned_stream_carries_logprobs() {
        let client = LlmClient::canned("{}", vec![-0.5, -0.25]);
        let (content, logprobs) = collect(&client, "ignored").await;
        assert_eq!(content, "{}");
        assert_eq!(logprobs, vec![-0.5, -0.25]);
    }

    #[test]
    fn test_from_settings_mock_wins() {
        let settings = LlmSettings {
            api_key: Some("sk-test".into()),
            model: "gpt-4o-mini".into(),
            mock_enabled: true,
            max_tokens: 512,
            temperature: 0.2,
            timeout_secs: 60,
        };
        let client = LlmClient::from_settings(&settings).unwrap();
        assert!(client.is_mock());
        assert_eq!(client.model_name(), "mock_model");
    }

    #[test]
    fn test_from_settings_live_requires_key() {
        let settings = LlmSettings {
            api_key: None,
            model: "gpt-4o-mini".into(),
            mock_enabled: false,
            max_tokens: 512,
            temperature: 0.2,
            timeout_secs: 60,
        };
        assert!(matches!(
            LlmClient::from_settings(&settings),
            Err(Error::Config(_))
        ));
    }
}
