//! I/O utilities.
//!
//! File reading with memory mapping for large inputs, chunk file output,
//! and Unicode helpers for decoding and display.

pub mod reader;
pub mod unicode;

pub use reader::{FileReader, MANIFEST_FILE, ManifestEntry, read_file, write_chunks, write_file};
pub use unicode::{preview, validate_utf8};
