use crate::types::{Chunk, RagError, Result};
use text_splitter::{Characters, ChunkConfig, TextSplitter};

/// Splits document text into overlapping chunks of bounded size.
///
/// Sizes are in characters. Boundary selection (sentence and paragraph
/// awareness) is delegated to the `text-splitter` crate; this type only
/// validates parameters and attaches provenance metadata.
pub struct DocumentSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
    splitter: TextSplitter<Characters>,
}

impl DocumentSplitter {
    /// Create a splitter. Requires `chunk_overlap < chunk_size` and a
    /// non-zero `chunk_size`; anything else is rejected up front instead of
    /// producing degenerate windows mid-split.
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(RagError::InvalidInput(
                "chunk_size must be positive".to_string(),
            ));
        }
        if chunk_overlap >= chunk_size {
            return Err(RagError::InvalidInput(format!(
                "chunk_overlap ({}) must be smaller than chunk_size ({})",
                chunk_overlap, chunk_size
            )));
        }

        let config = ChunkConfig::new(chunk_size)
            .with_overlap(chunk_overlap)
            .map_err(|e| RagError::InvalidInput(format!("chunk configuration: {}", e)))?;

        Ok(Self {
            chunk_size,
            chunk_overlap,
            splitter: TextSplitter::new(config),
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunk_overlap(&self) -> usize {
        self.chunk_overlap
    }

    /// Split `text` into ordered chunks tagged with `source`.
    ///
    /// Empty or whitespace-only text yields an empty sequence, not an error.
    pub fn split(&self, source: &str, text: &str) -> Vec<Chunk> {
        self.splitter
            .chunks(text)
            .filter(|chunk_text| !chunk_text.trim().is_empty())
            .enumerate()
            .map(|(chunk_index, chunk_text)| {
                Chunk::new(source, chunk_index, chunk_text.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "Machine learning is the study of computer algorithms that improve \
        automatically through experience. It is seen as a part of artificial intelligence. \
        Machine learning algorithms build a model based on sample data, known as training data, \
        in order to make predictions or decisions without being explicitly programmed to do so.";

    #[test]
    fn splits_into_bounded_chunks() {
        let splitter = DocumentSplitter::new(120, 20).unwrap();
        let chunks = splitter.split("sample.pdf", SAMPLE);

        assert!(!chunks.is_empty());
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 120);
            assert_eq!(chunk.metadata.source, "sample.pdf");
        }
    }

    #[test]
    fn chunk_order_follows_document_order() {
        let splitter = DocumentSplitter::new(120, 20).unwrap();
        let chunks = splitter.split("sample.pdf", SAMPLE);

        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.metadata.chunk_index, i);
        }
    }

    #[test]
    fn splitting_is_idempotent() {
        let splitter = DocumentSplitter::new(100, 10).unwrap();
        let first = splitter.split("sample.pdf", SAMPLE);
        let second = splitter.split("sample.pdf", SAMPLE);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.text, b.text);
        }
    }

    #[test]
    fn empty_document_yields_empty_sequence() {
        let splitter = DocumentSplitter::new(100, 10).unwrap();
        assert!(splitter.split("empty.pdf", "").is_empty());
        assert!(splitter.split("blank.pdf", "   \n  ").is_empty());
    }

    #[test]
    fn overlap_must_be_smaller_than_size() {
        assert!(DocumentSplitter::new(100, 100).is_err());
        assert!(DocumentSplitter::new(100, 150).is_err());
        assert!(DocumentSplitter::new(0, 0).is_err());
    }
}
