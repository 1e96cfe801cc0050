//! Retrieval Augmented Generation (RAG) building blocks.
//!
//! # Module Structure
//!
//! - [`loader`] - PDF text extraction
//! - [`chunker`] - Splitting documents into overlapping chunks
//! - [`embeddings`] - Embedding providers behind the [`embeddings::Embedder`] trait
//! - [`index`] - In-memory, write-once vector index with cosine search
//!
//! # Pipeline
//!
//! Ingestion runs once at startup:
//!
//! 1. **Load** - extract plain text from the source PDF
//! 2. **Chunk** - split into overlapping windows, preserving document order
//! 3. **Embed** - one vector per chunk via an external provider
//! 4. **Index** - store `(vector, chunk)` entries for similarity search
//!
//! At query time the index is read-only; see [`crate::pipeline`] for the
//! chains that consume it.

pub mod chunker;
pub mod embeddings;
pub mod index;
pub mod loader;

pub use chunker::DocumentSplitter;
pub use embeddings::{Embedder, EmbeddingProvider};
pub use index::MemoryVectorIndex;
pub use loader::PdfLoader;
