//! TextLens LLM — streaming analysis client and confidence scoring.
//!
//! Live mode streams SSE chunks from an OpenAI-compatible chat-completions
//! endpoint, collecting content deltas and per-token log-probabilities.
//! Mock mode substitutes one fixed, valid JSON fragment for deterministic
//! tests and keyless development.

pub mod client;
pub mod confidence;
pub mod prompt;
pub mod types;

pub use client::{BoxedStream, LlmClient};
pub use types::{LlmAnalysis, StreamChunk};
