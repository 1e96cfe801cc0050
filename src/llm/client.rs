use crate::types::{Message, Result};
use crate::utils::Config;
use async_trait::async_trait;
use std::sync::Arc;

/// Generic chat client trait for provider abstraction.
///
/// A chat call is stateless: the full message sequence is supplied on every
/// invocation and nothing is retained between calls.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send an ordered message sequence and return the model's response text.
    async fn complete(&self, messages: &[Message], sampling: &SamplingConfig) -> Result<String>;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Sampling settings applied to every chat call.
#[derive(Debug, Clone, Copy)]
pub struct SamplingConfig {
    pub temperature: f32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        // Low temperature: rephrased questions should be near-deterministic.
        Self { temperature: 0.1 }
    }
}

/// Provider enum for runtime chat-backend selection.
#[derive(Debug, Clone)]
pub enum ChatProvider {
    /// OpenAI API provider, including OpenRouter and compatible endpoints.
    #[cfg(feature = "openai")]
    OpenAi {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Ollama local LLM provider.
    #[cfg(feature = "ollama")]
    Ollama { base_url: String, model: String },
}

impl ChatProvider {
    /// Create a client instance for this provider.
    pub async fn create_client(&self) -> Result<Arc<dyn ChatClient>> {
        match self {
            #[cfg(feature = "openai")]
            ChatProvider::OpenAi {
                api_key,
                api_base,
                model,
            } => Ok(Arc::new(super::openai::OpenAiChatClient::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            #[cfg(feature = "ollama")]
            ChatProvider::Ollama { base_url, model } => Ok(Arc::new(
                super::ollama::OllamaChatClient::new(base_url.clone(), model.clone()),
            )),

            #[allow(unreachable_patterns)]
            _ => Err(crate::types::RagError::Configuration(
                "Chat provider not enabled. Check feature flags.".into(),
            )),
        }
    }

    /// Pick a provider from configuration: OpenAI when an API key is set,
    /// otherwise Ollama.
    pub fn from_config(config: &Config) -> Result<Self> {
        #[cfg(feature = "openai")]
        if let Some(api_key) = &config.llm.openai_api_key {
            return Ok(ChatProvider::OpenAi {
                api_key: api_key.clone(),
                api_base: config.llm.openai_api_base.clone(),
                model: config.llm.chat_model.clone(),
            });
        }

        #[cfg(feature = "ollama")]
        return Ok(ChatProvider::Ollama {
            base_url: config.llm.ollama_url.clone(),
            model: config.llm.chat_model.clone(),
        });

        #[cfg(not(feature = "ollama"))]
        Err(crate::types::RagError::Configuration(
            "No chat provider available: set OPENAI_API_KEY or enable the ollama feature".into(),
        ))
    }

    /// Get a human-readable name for this provider.
    pub fn name(&self) -> &'static str {
        match self {
            #[cfg(feature = "openai")]
            ChatProvider::OpenAi { .. } => "OpenAI",
            #[cfg(feature = "ollama")]
            ChatProvider::Ollama { .. } => "Ollama",
            #[allow(unreachable_patterns)]
            _ => "disabled",
        }
    }
}
