//! Deterministic fakes shared by the integration tests.
//!
//! No network, no model downloads: the embedder projects text onto fixed
//! keyword axes, and the chat client replays a canned response while
//! recording every message sequence it was sent.

use async_trait::async_trait;
use lectern::{ChatClient, Embedder, Message, Result, SamplingConfig};
use std::sync::Mutex;
use std::time::Duration;

/// Keyword axes for the fake embedding space.
const AXES: [&str; 4] = ["sky", "grass", "teach", "water"];

/// Embedder that counts keyword occurrences per axis.
///
/// Texts about the same keyword land on the same axis and get cosine
/// similarity 1.0; unrelated texts are orthogonal.
pub struct KeywordEmbedder;

#[async_trait]
impl Embedder for KeywordEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let lower = text.to_lowercase();
        Ok(AXES
            .iter()
            .map(|axis| lower.matches(axis).count() as f32)
            .collect())
    }

    fn model_name(&self) -> &str {
        "keyword-axes"
    }
}

/// Chat client that returns a fixed response and records its inputs.
pub struct CannedChatClient {
    response: String,
    delay: Option<Duration>,
    pub calls: Mutex<Vec<Vec<Message>>>,
}

impl CannedChatClient {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Delay every completion, for exercising caller-side timeouts.
    pub fn with_delay(response: impl Into<String>, delay: Duration) -> Self {
        Self {
            response: response.into(),
            delay: Some(delay),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl ChatClient for CannedChatClient {
    async fn complete(&self, messages: &[Message], _sampling: &SamplingConfig) -> Result<String> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "canned"
    }
}
