use crate::rag::{Embedder, MemoryVectorIndex};
use crate::types::{RagError, Result, ScoredChunk};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Opening delimiter wrapped around each retrieved chunk.
pub const DOC_OPEN: &str = "<doc>";
/// Closing delimiter wrapped around each retrieved chunk.
pub const DOC_CLOSE: &str = "</doc>";

/// Retrieves the chunks most relevant to a standalone question and
/// serializes them into a single context string.
///
/// The index is an explicit argument to every call; the chain holds no
/// index state of its own.
pub struct RetrievalChain {
    embedder: Arc<dyn Embedder>,
    top_k: usize,
    timeout: Duration,
}

impl RetrievalChain {
    pub fn new(embedder: Arc<dyn Embedder>, top_k: usize, timeout: Duration) -> Self {
        Self {
            embedder,
            top_k,
            timeout,
        }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Embed the question, search the index, and serialize the results.
    ///
    /// An empty index yields an empty string deterministically, without
    /// calling the embedding provider.
    pub async fn run(&self, standalone_question: &str, index: &MemoryVectorIndex) -> Result<String> {
        if index.is_empty() {
            debug!("retrieval against empty index");
            return Ok(String::new());
        }

        let query = tokio::time::timeout(
            self.timeout,
            self.embedder.embed(standalone_question),
        )
        .await
        .map_err(|_| {
            RagError::Embedding(format!("Query embedding timed out after {:?}", self.timeout))
        })??;

        let results = index.search(&query, self.top_k);
        debug!(
            question = standalone_question,
            results = results.len(),
            "retrieved context chunks"
        );

        Ok(render_context(&results))
    }
}

/// Wrap each chunk's text in document delimiters and join with newlines,
/// preserving the given (most-similar-first) order.
pub fn render_context(chunks: &[ScoredChunk]) -> String {
    chunks
        .iter()
        .map(|scored| format!("{}\n{}\n{}", DOC_OPEN, scored.chunk.text, DOC_CLOSE))
        .collect::<Vec<_>>()
        .join("\n")
}
