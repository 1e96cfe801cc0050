use crate::rag::embeddings::Embedder;
use crate::types::{Chunk, RagError, Result, ScoredChunk};
use tracing::{debug, info};

/// In-memory vector index over document chunks.
///
/// Write-once, read-many: the index is populated in full by [`build`] and
/// never mutated afterwards, so it can be shared by plain reference across
/// retrieval calls with no locking. Entries keep insertion (document) order,
/// which makes search tie-breaking deterministic within a process run.
///
/// [`build`]: MemoryVectorIndex::build
pub struct MemoryVectorIndex {
    entries: Vec<IndexEntry>,
    dimensions: usize,
}

struct IndexEntry {
    embedding: Vec<f32>,
    chunk: Chunk,
}

impl MemoryVectorIndex {
    /// Embed every chunk and build a fresh index.
    ///
    /// All-or-nothing: if any embedding fails, the whole build fails and no
    /// index value is produced. An empty chunk sequence builds an empty
    /// index, against which every search returns no results.
    pub async fn build(embedder: &dyn Embedder, chunks: Vec<Chunk>) -> Result<Self> {
        if chunks.is_empty() {
            return Ok(Self {
                entries: Vec::new(),
                dimensions: 0,
            });
        }

        let texts: Vec<String> = chunks.iter().map(|chunk| chunk.text.clone()).collect();
        let embeddings = embedder.embed_batch(&texts).await?;

        if embeddings.len() != chunks.len() {
            return Err(RagError::Embedding(format!(
                "Embedded {} of {} chunks",
                embeddings.len(),
                chunks.len()
            )));
        }

        let dimensions = embeddings[0].len();
        if dimensions == 0 {
            return Err(RagError::Embedding("Zero-dimensional embedding".to_string()));
        }
        for embedding in &embeddings {
            if embedding.len() != dimensions {
                return Err(RagError::Embedding(format!(
                    "Inconsistent embedding dimensions: {} vs {}",
                    embedding.len(),
                    dimensions
                )));
            }
        }

        let entries = embeddings
            .into_iter()
            .zip(chunks)
            .map(|(embedding, chunk)| IndexEntry { embedding, chunk })
            .collect::<Vec<_>>();

        info!(
            entries = entries.len(),
            dimensions,
            model = embedder.model_name(),
            "built vector index"
        );

        Ok(Self {
            entries,
            dimensions,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Vector dimensionality, 0 for an empty index.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Return the `k` chunks most similar to `query`, best first.
    ///
    /// Similarity is cosine. The sort is stable, so equal scores keep
    /// document order. At most `k` results; fewer when the index is small.
    pub fn search(&self, query: &[f32], k: usize) -> Vec<ScoredChunk> {
        let mut results: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|entry| ScoredChunk {
                chunk: entry.chunk.clone(),
                score: cosine_similarity(query, &entry.embedding),
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(k);

        debug!(results = results.len(), k, "vector search");
        results
    }
}

/// Cosine similarity between two vectors; 0.0 for mismatched lengths or
/// zero-magnitude inputs.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
