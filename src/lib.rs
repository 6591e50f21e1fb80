//! # studypack
//!
//! Course-material ingestion and chunking.
//!
//! studypack turns lecture notes, slide decks, and pasted text into an
//! ordered list of chunks sized for a language model's context window.
//! Each source is split on paragraph boundaries first, falls back to
//! sentence boundaries for oversized paragraphs, and carries a
//! sentence-aligned overlap between consecutive chunks.
//!
//! ## Features
//!
//! - **Chunking**: paragraph-first packing under a token budget
//! - **Multi-source batches**: per-source attribution and indices, optional rayon parallelism
//! - **Pluggable extraction**: plain text built in, other formats via [`ingest::Extractor`]
//! - **Memory Mapping**: efficient reading of large input files
//!
//! ## Example
//!
//! ```
//! use studypack::chunking::{ChunkConfig, SourceText, chunk_sources};
//!
//! let chunks = chunk_sources(
//!     &[SourceText::new("week1.txt", "Cells are small.\n\nThey divide.")],
//!     &ChunkConfig::default(),
//! )
//! .unwrap();
//! assert_eq!(chunks[0].chunk_index, 0);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod chunking;
pub mod cli;
pub mod core;
pub mod error;
pub mod ingest;
pub mod io;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, SourceDocument, SourceKind};

// Re-export chunking types
pub use chunking::{
    ChunkConfig, Chunker, ParagraphChunker, SourceAggregator, SourceText, chunk_sources,
    chunk_text, estimate_tokens,
};

// Re-export ingestion types
pub use ingest::{DocumentProcessor, ProcessedBatch};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
