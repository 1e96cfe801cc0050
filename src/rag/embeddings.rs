use crate::types::{RagError, Result};
use crate::utils::Config;
use async_trait::async_trait;
use futures::future::try_join_all;
use std::sync::Arc;

/// Text embedding provider.
///
/// The same embedder must be used to build an index and to embed queries
/// against it; mixing providers puts query vectors in a different embedding
/// space and is a caller error.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text into a fixed-length vector.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// The default implementation fans the texts out concurrently; providers
    /// with a native batch endpoint should override it.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        try_join_all(texts.iter().map(|text| self.embed(text))).await
    }

    /// Get the embedding model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime embedding-backend selection.
#[derive(Debug, Clone)]
pub enum EmbeddingProvider {
    /// OpenAI embeddings API, including compatible endpoints.
    #[cfg(feature = "openai")]
    OpenAi {
        api_key: String,
        api_base: String,
        model: String,
    },

    /// Local ONNX embedding models via fastembed. Downloads model weights
    /// (~100MB) on first use; no network needed afterwards.
    #[cfg(feature = "local-embeddings")]
    Local { model: String },
}

impl EmbeddingProvider {
    /// Create an embedder instance for this provider.
    pub fn create_embedder(&self) -> Result<Arc<dyn Embedder>> {
        match self {
            #[cfg(feature = "openai")]
            EmbeddingProvider::OpenAi {
                api_key,
                api_base,
                model,
            } => Ok(Arc::new(OpenAiEmbedder::new(
                api_key.clone(),
                api_base.clone(),
                model.clone(),
            ))),

            #[cfg(feature = "local-embeddings")]
            EmbeddingProvider::Local { model } => {
                Ok(Arc::new(local::LocalEmbedder::new(model)?))
            }

            #[allow(unreachable_patterns)]
            _ => Err(RagError::Configuration(
                "Embedding provider not enabled. Check feature flags.".into(),
            )),
        }
    }

    /// Pick a provider from configuration: OpenAI when an API key is set,
    /// otherwise local embeddings when that feature is enabled.
    pub fn from_config(config: &Config) -> Result<Self> {
        #[cfg(feature = "openai")]
        if let Some(api_key) = &config.llm.openai_api_key {
            return Ok(EmbeddingProvider::OpenAi {
                api_key: api_key.clone(),
                api_base: config.llm.openai_api_base.clone(),
                model: config.rag.embedding_model.clone(),
            });
        }

        #[cfg(feature = "local-embeddings")]
        return Ok(EmbeddingProvider::Local {
            model: config.rag.embedding_model.clone(),
        });

        #[cfg(not(feature = "local-embeddings"))]
        Err(RagError::Configuration(
            "No embedding provider available: set OPENAI_API_KEY or enable local-embeddings"
                .into(),
        ))
    }
}

// ============================================================================
// OpenAI Embedder
// ============================================================================

#[cfg(feature = "openai")]
pub use openai_embedder::OpenAiEmbedder;

#[cfg(feature = "openai")]
mod openai_embedder {
    use super::*;
    use async_openai::{
        config::OpenAIConfig, types::embeddings::CreateEmbeddingRequestArgs, Client,
    };

    /// Embedder backed by the OpenAI embeddings endpoint.
    pub struct OpenAiEmbedder {
        client: Client<OpenAIConfig>,
        model: String,
    }

    impl OpenAiEmbedder {
        pub fn new(api_key: String, api_base: String, model: String) -> Self {
            let config = OpenAIConfig::new()
                .with_api_key(api_key)
                .with_api_base(api_base);

            Self {
                client: Client::with_config(config),
                model,
            }
        }

        async fn request(&self, inputs: Vec<String>) -> Result<Vec<Vec<f32>>> {
            let expected = inputs.len();
            let request = CreateEmbeddingRequestArgs::default()
                .model(&self.model)
                .input(inputs)
                .build()
                .map_err(|e| RagError::Embedding(format!("Failed to build request: {}", e)))?;

            let response = self
                .client
                .embeddings()
                .create(request)
                .await
                .map_err(|e| RagError::Embedding(format!("OpenAI API error: {}", e)))?;

            if response.data.len() != expected {
                return Err(RagError::Embedding(format!(
                    "Expected {} embeddings, got {}",
                    expected,
                    response.data.len()
                )));
            }

            // Reassemble by response index, not arrival order
            let mut vectors: Vec<Vec<f32>> = vec![Vec::new(); expected];
            for item in response.data {
                let index = item.index as usize;
                if index >= expected {
                    return Err(RagError::Embedding(format!(
                        "Embedding index {} out of range",
                        index
                    )));
                }
                vectors[index] = item.embedding;
            }

            Ok(vectors)
        }
    }

    #[async_trait]
    impl Embedder for OpenAiEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut vectors = self.request(vec![text.to_string()]).await?;
            vectors
                .pop()
                .ok_or_else(|| RagError::Embedding("Empty embedding response".to_string()))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            if texts.is_empty() {
                return Ok(Vec::new());
            }
            self.request(texts.to_vec()).await
        }

        fn model_name(&self) -> &str {
            &self.model
        }
    }
}

// ============================================================================
// Local Embedder (fastembed)
// ============================================================================

#[cfg(feature = "local-embeddings")]
pub use local::LocalEmbedder;

#[cfg(feature = "local-embeddings")]
mod local {
    use super::*;
    use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
    use parking_lot::Mutex;

    /// Embedder backed by a local fastembed ONNX model.
    ///
    /// Inference is CPU-bound and synchronous; the model is guarded by a
    /// mutex because fastembed's embed call needs exclusive access.
    pub struct LocalEmbedder {
        model: Mutex<TextEmbedding>,
        model_name: String,
    }

    impl LocalEmbedder {
        pub fn new(model_name: &str) -> Result<Self> {
            let model = TextEmbedding::try_new(
                InitOptions::new(resolve_model(model_name)).with_show_download_progress(true),
            )
            .map_err(|e| RagError::Embedding(e.to_string()))?;

            Ok(Self {
                model: Mutex::new(model),
                model_name: model_name.to_string(),
            })
        }
    }

    fn resolve_model(name: &str) -> EmbeddingModel {
        match name {
            "sentence-transformers/all-MiniLM-L6-v2" | "all-MiniLM-L6-v2" => {
                EmbeddingModel::AllMiniLML6V2
            }
            _ => EmbeddingModel::BGESmallENV15,
        }
    }

    #[async_trait]
    impl Embedder for LocalEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let mut vectors = self
                .model
                .lock()
                .embed(vec![text], None)
                .map_err(|e| RagError::Embedding(e.to_string()))?;

            vectors
                .pop()
                .ok_or_else(|| RagError::Embedding("Empty embedding output".to_string()))
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let refs: Vec<&str> = texts.iter().map(|t| t.as_str()).collect();
            self.model
                .lock()
                .embed(refs, None)
                .map_err(|e| RagError::Embedding(e.to_string()))
        }

        fn model_name(&self) -> &str {
            &self.model_name
        }
    }
}
