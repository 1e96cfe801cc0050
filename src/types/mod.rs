use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============= Document Types =============

/// A bounded slice of document text plus provenance metadata.
///
/// Chunks are immutable after creation. Ordering among chunks from the same
/// document follows document order (`metadata.chunk_index`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Source document identifier (usually the file name).
    pub source: String,
    /// Position of this chunk within its source document.
    pub chunk_index: usize,
    pub created_at: DateTime<Utc>,
}

impl Chunk {
    /// Create a chunk with a deterministic id.
    ///
    /// The id is a UUID v5 over (source, index, text), so splitting the same
    /// document twice with the same parameters yields identical chunks.
    pub fn new(source: &str, chunk_index: usize, text: String) -> Self {
        let id = Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            format!("{}\u{0}{}\u{0}{}", source, chunk_index, text).as_bytes(),
        )
        .to_string();

        Self {
            id,
            text,
            metadata: ChunkMetadata {
                source: source.to_string(),
                chunk_index,
                created_at: Utc::now(),
            },
        }
    }
}

/// A chunk returned from a vector search, with its similarity score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

// ============= Conversation Types =============

/// One turn of a conversation. History is supplied fresh per call and is not
/// retained by any pipeline component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Assistant,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// Source document missing, unreadable, or not parseable.
    #[error("Load error: {0}")]
    Load(String),

    /// Embedding provider unreachable or rejected input.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Chat model invocation failed.
    #[error("Model invocation error: {0}")]
    Model(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, RagError>;
