//! Input ingestion.
//!
//! Turns uploaded files and manual text into [`crate::core::SourceDocument`]s
//! and runs them through the chunking pipeline as one batch.

pub mod extract;
pub mod processor;

pub use extract::{Extractor, ExtractorRegistry, PlainTextExtractor};
pub use processor::{
    BatchMetadata, DocumentProcessor, MAX_MANUAL_TEXT_CHARS, MAX_TOTAL_DOCUMENTS,
    ProcessedBatch, SOURCE_SEPARATOR, SourceSummary, combine_sources,
};
