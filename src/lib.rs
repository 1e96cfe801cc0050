//! # lectern
//!
//! Retrieval-augmented question answering over PDF documents: load a PDF,
//! split it into overlapping chunks, embed the chunks into an in-memory
//! vector index, and answer questions against it with a pair of chat
//! composition chains (rephrase + retrieval), optionally finished by an
//! answer-generation chain.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use lectern::{
//!     ChatProvider, Config, DocumentSplitter, EmbeddingProvider,
//!     MemoryVectorIndex, PdfLoader, QaPipeline, SamplingConfig,
//! };
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!
//!     // Ingest once at startup
//!     let splitter = DocumentSplitter::new(config.rag.chunk_size, config.rag.chunk_overlap)?;
//!     let chunks = PdfLoader::load_and_split("data/MachineLearning-Lecture01.pdf", &splitter)?;
//!     let embedder = EmbeddingProvider::from_config(&config)?.create_embedder()?;
//!     let index = MemoryVectorIndex::build(embedder.as_ref(), chunks).await?;
//!
//!     // Query
//!     let chat = ChatProvider::from_config(&config)?.create_client().await?;
//!     let pipeline = QaPipeline::new(
//!         chat,
//!         embedder,
//!         SamplingConfig { temperature: config.llm.temperature },
//!         config.rag.top_k,
//!         Duration::from_secs(config.llm.request_timeout_secs),
//!     );
//!
//!     let outcome = pipeline.ask(&index, &[], "Who teaches CS229?").await?;
//!     println!("{}", outcome.answer.unwrap_or_default());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `openai` | OpenAI API chat + embeddings, and compatible endpoints (default) |
//! | `ollama` | Ollama local chat inference (default) |
//! | `local-embeddings` | fastembed ONNX embeddings, no network required |
//!
//! ## Modules
//!
//! - [`rag`] - loading, chunking, embeddings, and the in-memory vector index
//! - [`pipeline`] - the rephrase, retrieval, and answer chains
//! - [`llm`] - chat provider clients and abstractions
//! - [`types`] - core types and error handling
//! - [`utils`] - configuration

/// Chat model clients and provider abstractions.
pub mod llm;
/// Composition chains (rephrase, retrieval, answer).
pub mod pipeline;
/// RAG building blocks (loader, chunker, embeddings, vector index).
pub mod rag;
/// Core types (chunks, messages, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use llm::{ChatClient, ChatProvider, SamplingConfig};
pub use pipeline::{AnswerChain, QaPipeline, QueryOutcome, RephraseChain, RetrievalChain};
pub use rag::{DocumentSplitter, Embedder, EmbeddingProvider, MemoryVectorIndex, PdfLoader};
pub use types::{Chunk, ChunkMetadata, Message, RagError, Result, Role, ScoredChunk};
pub use utils::Config;
