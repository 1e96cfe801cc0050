use crate::rag::chunker::DocumentSplitter;
use crate::types::{Chunk, RagError, Result};
use std::path::Path;
use tracing::debug;

/// Loads PDF files into plain text.
///
/// Extraction is per page, with pages joined by newlines into one logical
/// document per source file. A PDF with no extractable text yields an empty
/// string, which the splitter turns into an empty chunk sequence.
pub struct PdfLoader;

impl PdfLoader {
    /// Extract the text of every page, in page order.
    pub fn load(path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let doc = lopdf::Document::load(path)
            .map_err(|e| RagError::Load(format!("{}: {}", path.display(), e)))?;

        let mut pages_text = Vec::new();
        for (page_number, _) in doc.get_pages() {
            let text = doc
                .extract_text(&[page_number])
                .map_err(|e| RagError::Load(format!("page {}: {}", page_number, e)))?;
            pages_text.push(text);
        }

        debug!(pages = pages_text.len(), path = %path.display(), "extracted pdf text");
        Ok(pages_text.join("\n"))
    }

    /// Load a PDF and split it into chunks in one step.
    ///
    /// The chunk source is the file name; chunk order follows document order.
    pub fn load_and_split(
        path: impl AsRef<Path>,
        splitter: &DocumentSplitter,
    ) -> Result<Vec<Chunk>> {
        let path = path.as_ref();
        let text = Self::load(path)?;
        let source = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(splitter.split(&source, &text))
    }
}
