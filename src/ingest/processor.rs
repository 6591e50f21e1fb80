//! Batch document processing.
//!
//! Validates a batch of inputs (files plus optional manual text),
//! extracts each into a [`SourceDocument`], and chunks the batch into one
//! ordered chunk list with batch-level metadata.

use crate::chunking::{ChunkConfig, ParagraphChunker, SourceAggregator, SourceText};
use crate::core::{Chunk, SourceDocument, SourceKind, SourceMetadata};
use crate::error::{IngestError, Result};
use crate::ingest::extract::ExtractorRegistry;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Maximum number of documents (files plus manual text) per batch.
pub const MAX_TOTAL_DOCUMENTS: usize = 5;

/// Maximum length of manual text, in characters.
pub const MAX_MANUAL_TEXT_CHARS: usize = 10_000;

/// Separator between sources in the combined text.
pub const SOURCE_SEPARATOR: &str = "\n\n---\n\n";

/// Per-source entry in [`BatchMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSummary {
    /// Source identifier.
    pub name: String,
    /// Document kind.
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Extractor counters.
    pub metadata: SourceMetadata,
}

impl From<&SourceDocument> for SourceSummary {
    fn from(doc: &SourceDocument) -> Self {
        Self {
            name: doc.source.clone(),
            kind: doc.kind,
            metadata: doc.metadata.clone(),
        }
    }
}

/// Totals for a processed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchMetadata {
    /// Number of extracted sources.
    pub total_sources: usize,
    /// Number of chunks across all sources.
    pub total_chunks: usize,
    /// Character count of the combined text.
    pub total_characters: usize,
    /// One entry per source, in input order.
    pub sources: Vec<SourceSummary>,
}

/// Result of processing one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedBatch {
    /// Every source's text, each prefixed with `Source: {name}`.
    pub all_text_combined: String,
    /// Extracted documents, in input order.
    pub extracted_sources: Vec<SourceDocument>,
    /// Chunks of all sources, in source order.
    pub chunks: Vec<Chunk>,
    /// Batch totals.
    pub metadata: BatchMetadata,
}

/// Orchestrates extraction and chunking for a batch of inputs.
///
/// # Examples
///
/// ```
/// use studypack::ingest::DocumentProcessor;
///
/// let processor = DocumentProcessor::new();
/// let batch = processor.run(&[], Some("Mitosis has four phases.")).unwrap();
///
/// assert_eq!(batch.metadata.total_sources, 1);
/// assert_eq!(batch.chunks[0].source, "manual_text");
/// assert!(batch.all_text_combined.starts_with("Source: manual_text\n\n"));
/// ```
#[derive(Debug)]
pub struct DocumentProcessor {
    registry: ExtractorRegistry,
    config: ChunkConfig,
    parallel: bool,
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentProcessor {
    /// Creates a processor with the built-in extractors and default budgets.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ExtractorRegistry::new())
    }

    /// Creates a processor with a custom extractor registry.
    #[must_use]
    pub fn with_registry(registry: ExtractorRegistry) -> Self {
        Self {
            registry,
            config: ChunkConfig::default(),
            parallel: false,
        }
    }

    /// Sets the chunk budgets.
    #[must_use]
    pub const fn config(mut self, config: ChunkConfig) -> Self {
        self.config = config;
        self
    }

    /// Chunks sources on the rayon pool when enabled.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the extractor registry.
    #[must_use]
    pub const fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Validates the inputs and extracts every document.
    ///
    /// Manual text counts toward the document limit whenever it is
    /// non-empty, but only becomes a source when it is not blank.
    ///
    /// # Errors
    ///
    /// - [`IngestError::TooManyDocuments`] above [`MAX_TOTAL_DOCUMENTS`]
    /// - [`IngestError::NoInput`] when nothing is supplied
    /// - [`IngestError::ManualTextTooLong`] above [`MAX_MANUAL_TEXT_CHARS`]
    /// - any extraction error, for the first failing file
    pub fn collect(&self, files: &[PathBuf], manual_text: Option<&str>) -> Result<Vec<SourceDocument>> {
        let manual_text = manual_text.filter(|text| !text.is_empty());
        let total = files.len() + usize::from(manual_text.is_some());

        if total > MAX_TOTAL_DOCUMENTS {
            return Err(IngestError::TooManyDocuments {
                count: total,
                max: MAX_TOTAL_DOCUMENTS,
            }
            .into());
        }
        if total == 0 {
            return Err(IngestError::NoInput.into());
        }

        let mut documents = files
            .iter()
            .map(|path| self.registry.extract_file(path))
            .collect::<Result<Vec<_>>>()?;

        if let Some(text) = manual_text
            && !text.trim().is_empty()
        {
            let length = text.chars().count();
            if length > MAX_MANUAL_TEXT_CHARS {
                return Err(IngestError::ManualTextTooLong {
                    length,
                    max: MAX_MANUAL_TEXT_CHARS,
                }
                .into());
            }
            documents.push(SourceDocument::manual(text));
        }

        Ok(documents)
    }

    /// Chunks extracted documents and assembles the batch result.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk configuration is invalid.
    pub fn process(&self, documents: Vec<SourceDocument>) -> Result<ProcessedBatch> {
        let all_text_combined = combine_sources(&documents);

        let sources: Vec<SourceText> = documents.iter().map(SourceText::from).collect();
        let chunks = SourceAggregator::new(ParagraphChunker::with_config(self.config))
            .parallel(self.parallel)
            .aggregate(&sources)?;

        let metadata = BatchMetadata {
            total_sources: documents.len(),
            total_chunks: chunks.len(),
            total_characters: all_text_combined.chars().count(),
            sources: documents.iter().map(SourceSummary::from).collect(),
        };

        tracing::info!(
            sources = metadata.total_sources,
            chunks = metadata.total_chunks,
            characters = metadata.total_characters,
            "processed batch"
        );

        Ok(ProcessedBatch {
            all_text_combined,
            extracted_sources: documents,
            chunks,
            metadata,
        })
    }

    /// Collects and processes a batch in one step.
    ///
    /// The chunk configuration is checked before any file is read.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::collect`] or [`Self::process`].
    pub fn run(&self, files: &[PathBuf], manual_text: Option<&str>) -> Result<ProcessedBatch> {
        self.config.validate()?;
        let documents = self.collect(files, manual_text)?;
        self.process(documents)
    }
}

/// Joins documents into one labelled text.
///
/// # Examples
///
/// ```
/// use studypack::core::{SourceDocument, SourceKind};
/// use studypack::ingest::combine_sources;
///
/// let docs = vec![
///     SourceDocument::new("a.txt", SourceKind::Text, "Alpha".to_string()),
///     SourceDocument::new("b.txt", SourceKind::Text, "Beta".to_string()),
/// ];
/// assert_eq!(
///     combine_sources(&docs),
///     "Source: a.txt\n\nAlpha\n\n---\n\nSource: b.txt\n\nBeta"
/// );
/// ```
#[must_use]
pub fn combine_sources(documents: &[SourceDocument]) -> String {
    documents
        .iter()
        .map(|doc| format!("Source: {}\n\n{}", doc.source, doc.text))
        .collect::<Vec<_>>()
        .join(SOURCE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::MANUAL_TEXT_SOURCE;
    use crate::error::{ChunkingError, Error};
    use tempfile::TempDir;

    fn write_notes(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_no_input() {
        let result = DocumentProcessor::new().collect(&[], None);
        assert!(matches!(result, Err(Error::Ingest(IngestError::NoInput))));

        let result = DocumentProcessor::new().collect(&[], Some(""));
        assert!(matches!(result, Err(Error::Ingest(IngestError::NoInput))));
    }

    #[test]
    fn test_too_many_documents_counts_manual_text() {
        let files: Vec<PathBuf> = (0..5).map(|i| PathBuf::from(format!("f{i}.txt"))).collect();
        let result = DocumentProcessor::new().collect(&files, Some("extra"));
        assert!(matches!(
            result,
            Err(Error::Ingest(IngestError::TooManyDocuments { count: 6, max: 5 }))
        ));
    }

    #[test]
    fn test_blank_manual_text_counts_but_is_dropped() {
        let docs = DocumentProcessor::new().collect(&[], Some("   ")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_manual_text_limit() {
        let text = "a".repeat(MAX_MANUAL_TEXT_CHARS);
        assert!(DocumentProcessor::new().collect(&[], Some(&text)).is_ok());

        let text = "a".repeat(MAX_MANUAL_TEXT_CHARS + 1);
        let result = DocumentProcessor::new().collect(&[], Some(&text));
        assert!(matches!(
            result,
            Err(Error::Ingest(IngestError::ManualTextTooLong { length: 10_001, .. }))
        ));
    }

    #[test]
    fn test_manual_text_metadata() {
        let docs = DocumentProcessor::new()
            .collect(&[], Some("  Osmosis.  "))
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, MANUAL_TEXT_SOURCE);
        assert_eq!(docs[0].text, "Osmosis.");
        assert_eq!(docs[0].metadata["characters"], 12);
    }

    #[test]
    fn test_files_then_manual_text_order() {
        let dir = TempDir::new().unwrap();
        let a = write_notes(&dir, "a.txt", "Alpha notes.");
        let b = write_notes(&dir, "b.md", "Beta notes.");

        let docs = DocumentProcessor::new()
            .collect(&[a, b], Some("Manual notes."))
            .unwrap();
        let names: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.md", MANUAL_TEXT_SOURCE]);
    }

    #[test]
    fn test_failing_file_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let good = write_notes(&dir, "good.txt", "Fine.");
        let empty = write_notes(&dir, "empty.txt", "  \n ");

        let result = DocumentProcessor::new().collect(&[good, empty], None);
        assert!(matches!(
            result,
            Err(Error::Ingest(IngestError::NoExtractableText { .. }))
        ));
    }

    #[test]
    fn test_process_batch_envelope() {
        let dir = TempDir::new().unwrap();
        let a = write_notes(&dir, "a.txt", "Alpha one.\n\nAlpha two.");

        let batch = DocumentProcessor::new()
            .run(&[a], Some("Manual."))
            .unwrap();

        assert_eq!(
            batch.all_text_combined,
            "Source: a.txt\n\nAlpha one.\n\nAlpha two.\n\n---\n\nSource: manual_text\n\nManual."
        );
        assert_eq!(batch.extracted_sources.len(), 2);
        assert_eq!(batch.chunks.len(), 2);
        assert_eq!(batch.chunks[0].text, "Alpha one.\n\nAlpha two.");
        assert_eq!(batch.chunks[1].source, MANUAL_TEXT_SOURCE);
        assert_eq!(batch.metadata.total_sources, 2);
        assert_eq!(batch.metadata.total_chunks, 2);
        assert_eq!(
            batch.metadata.total_characters,
            batch.all_text_combined.chars().count()
        );
        assert_eq!(batch.metadata.sources[0].name, "a.txt");
        assert_eq!(batch.metadata.sources[0].metadata["paragraphs"], 2);
    }

    #[test]
    fn test_process_json_shape() {
        let batch = DocumentProcessor::new().run(&[], Some("Text.")).unwrap();
        let json = serde_json::to_value(&batch).unwrap();

        assert_eq!(json["metadata"]["sources"][0]["type"], "text");
        assert_eq!(json["extracted_sources"][0]["type"], "text");
        assert_eq!(json["chunks"][0]["chunk_index"], 0);
    }

    #[test]
    fn test_invalid_config_checked_before_reading() {
        let processor = DocumentProcessor::new().config(ChunkConfig::new(10, 10));
        let result = processor.run(&[PathBuf::from("/nonexistent/notes.txt")], None);
        assert!(matches!(
            result,
            Err(Error::Chunking(ChunkingError::OverlapTooLarge { .. }))
        ));
    }

    #[test]
    fn test_parallel_processing_same_result() {
        let dir = TempDir::new().unwrap();
        let files: Vec<PathBuf> = (0..4)
            .map(|i| {
                let body = format!("Doc {i} sentence. ").repeat(200);
                write_notes(&dir, &format!("d{i}.txt"), &body)
            })
            .collect();
        let config = ChunkConfig::new(80, 10);

        let sequential = DocumentProcessor::new().config(config).run(&files, None).unwrap();
        let parallel = DocumentProcessor::new()
            .config(config)
            .parallel(true)
            .run(&files, None)
            .unwrap();
        assert_eq!(sequential, parallel);
    }
}
