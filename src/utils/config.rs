use crate::types::{RagError, Result};
use serde::Deserialize;
use std::env;

/// Pipeline configuration.
///
/// Replaces the ambient configuration (hidden API keys, implicit model
/// selection) with an explicit value passed to each component at
/// construction time. Build one with [`Config::from_env`] or construct the
/// fields directly.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    pub openai_api_key: Option<String>,
    pub openai_api_base: String,
    pub ollama_url: String,
    /// Chat model used by the rephrase and answer chains.
    pub chat_model: String,
    /// Sampling temperature for chat calls. Low by default so rephrased
    /// questions stay near-deterministic.
    pub temperature: f32,
    /// Upper bound on every external provider call, in seconds.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagConfig {
    pub embedding_model: String,
    /// Approximate chunk size in characters.
    pub chunk_size: usize,
    /// Approximate overlap between consecutive chunks, in characters.
    pub chunk_overlap: usize,
    /// Number of chunks retrieved per query.
    pub top_k: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            llm: LlmConfig {
                openai_api_key: env::var("OPENAI_API_KEY").ok(),
                openai_api_base: env::var("OPENAI_API_BASE")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
                ollama_url: env::var("OLLAMA_URL")
                    .unwrap_or_else(|_| "http://localhost:11434".to_string()),
                chat_model: env::var("CHAT_MODEL")
                    .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
                temperature: parse_var("TEMPERATURE", 0.1)?,
                request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", 30)?,
            },
            rag: RagConfig {
                embedding_model: env::var("EMBEDDING_MODEL")
                    .unwrap_or_else(|_| "text-embedding-3-small".to_string()),
                chunk_size: parse_var("CHUNK_SIZE", 1000)?,
                chunk_overlap: parse_var("CHUNK_OVERLAP", 200)?,
                top_k: parse_var("TOP_K", 4)?,
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| RagError::Configuration(format!("{} is not a valid value", name))),
        Err(_) => Ok(default),
    }
}
