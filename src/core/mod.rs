//! Core domain models.
//!
//! Plain data shared by the ingestion and chunking layers: extracted
//! source documents and the chunks produced from them. No I/O here.

pub mod chunk;
pub mod source;

pub use chunk::Chunk;
pub use source::{MANUAL_TEXT_SOURCE, SourceDocument, SourceKind, SourceMetadata};
