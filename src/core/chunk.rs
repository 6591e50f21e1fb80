//! Chunk representation.
//!
//! A chunk is one bounded segment of a source's text, produced by a
//! [`Chunker`](crate::chunking::Chunker) and handed to the caller as plain
//! data. Chunks are never mutated after emission.

use serde::{Deserialize, Serialize};

/// One bounded, ordered text segment of a source.
///
/// # Examples
///
/// ```
/// use studypack::core::Chunk;
///
/// let chunk = Chunk::new("notes.txt", 0, "Hello, world!".to_string(), 3);
/// assert_eq!(chunk.source, "notes.txt");
/// assert_eq!(chunk.token_estimate, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Identifier of the originating document (filename or `manual_text`).
    pub source: String,

    /// Zero-based sequence number within the source.
    pub chunk_index: usize,

    /// Chunk content, trimmed of surrounding whitespace.
    pub text: String,

    /// Estimated model-token cost of `text`.
    pub token_estimate: usize,
}

impl Chunk {
    /// Creates a new chunk.
    ///
    /// # Arguments
    ///
    /// * `source` - Identifier of the originating document.
    /// * `chunk_index` - Sequential index within the source.
    /// * `text` - Chunk content.
    /// * `token_estimate` - Estimated token cost of `text`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        chunk_index: usize,
        text: String,
        token_estimate: usize,
    ) -> Self {
        Self {
            source: source.into(),
            chunk_index,
            text,
            token_estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_new() {
        let chunk = Chunk::new("doc.txt", 2, "Hello".to_string(), 1);
        assert_eq!(chunk.source, "doc.txt");
        assert_eq!(chunk.chunk_index, 2);
        assert_eq!(chunk.text, "Hello");
        assert_eq!(chunk.token_estimate, 1);
    }

    #[test]
    fn test_chunk_serializes_four_fields() {
        let chunk = Chunk::new("a.txt", 0, "short text".to_string(), 2);
        let value = serde_json::to_value(&chunk).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 4);
        assert_eq!(object["source"], "a.txt");
        assert_eq!(object["chunk_index"], 0);
        assert_eq!(object["text"], "short text");
        assert_eq!(object["token_estimate"], 2);

        let back: Chunk = serde_json::from_value(value).unwrap();
        assert_eq!(back, chunk);
    }
}
