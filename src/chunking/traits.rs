//! Chunker trait and configuration.
//!
//! Defines the interface for chunking strategies and the token budgets
//! they are driven by.

use crate::core::Chunk;
use crate::error::{ChunkingError, Result};
use serde::{Deserialize, Serialize};

/// Trait for chunking one source's text into bounded segments.
///
/// Implementations must be `Send + Sync` so sources can be chunked on a
/// thread pool, and must be deterministic: the same input always yields
/// the same chunks.
///
/// # Examples
///
/// ```
/// use studypack::chunking::{Chunker, ParagraphChunker};
///
/// let chunker = ParagraphChunker::new();
/// let chunks = chunker.chunk("notes.txt", "First.\n\nSecond.").unwrap();
/// assert_eq!(chunks.len(), 1);
/// ```
pub trait Chunker: Send + Sync {
    /// Chunks the text of a single source.
    ///
    /// # Arguments
    ///
    /// * `source` - Identifier stamped on every produced chunk.
    /// * `text` - The full source text.
    ///
    /// # Returns
    ///
    /// Chunks in emission order with indices `0..N`. Empty or
    /// whitespace-only text yields an empty vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunker's configuration is invalid.
    fn chunk(&self, source: &str, text: &str) -> Result<Vec<Chunk>>;

    /// Returns the name of the chunking strategy.
    fn name(&self) -> &'static str;

    /// Returns a description of the chunking strategy.
    fn description(&self) -> &'static str {
        "No description available"
    }

    /// Validates configuration before chunking.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot produce chunks.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// Token budgets for chunking.
///
/// # Examples
///
/// ```
/// use studypack::chunking::ChunkConfig;
///
/// let config = ChunkConfig::default();
/// assert_eq!(config.max_tokens, 1000);
/// assert_eq!(config.overlap_tokens, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Maximum estimated tokens per chunk.
    pub max_tokens: usize,

    /// Tokens of trailing context carried into the next chunk.
    pub overlap_tokens: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_TOKENS, super::DEFAULT_OVERLAP_TOKENS)
    }
}

impl ChunkConfig {
    /// Creates a configuration with explicit budgets.
    #[must_use]
    pub const fn new(max_tokens: usize, overlap_tokens: usize) -> Self {
        Self {
            max_tokens,
            overlap_tokens,
        }
    }

    /// Sets the chunk budget.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the overlap budget.
    #[must_use]
    pub const fn overlap_tokens(mut self, overlap_tokens: usize) -> Self {
        self.overlap_tokens = overlap_tokens;
        self
    }

    /// Checks the budgets.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkingError::InvalidConfig`] if `max_tokens` is zero and
    /// [`ChunkingError::OverlapTooLarge`] if the overlap is not smaller
    /// than `max_tokens`.
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(ChunkingError::InvalidConfig {
                reason: "max_tokens must be > 0".to_string(),
            }
            .into());
        }
        if self.overlap_tokens >= self.max_tokens {
            return Err(ChunkingError::OverlapTooLarge {
                overlap: self.overlap_tokens,
                max_tokens: self.max_tokens,
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_config_defaults() {
        let config = ChunkConfig::default();
        assert_eq!(config.max_tokens, 1000);
        assert_eq!(config.overlap_tokens, 100);
    }

    #[test]
    fn test_config_builder() {
        let config = ChunkConfig::default().max_tokens(500).overlap_tokens(20);
        assert_eq!(config, ChunkConfig::new(500, 20));
    }

    #[test]
    fn test_validate_zero_max_tokens() {
        let result = ChunkConfig::new(0, 0).validate();
        assert!(matches!(
            result,
            Err(Error::Chunking(ChunkingError::InvalidConfig { .. }))
        ));
    }

    #[test]
    fn test_validate_overlap_equal_to_budget() {
        let result = ChunkConfig::new(100, 100).validate();
        assert!(matches!(
            result,
            Err(Error::Chunking(ChunkingError::OverlapTooLarge {
                overlap: 100,
                max_tokens: 100
            }))
        ));
    }

    #[test]
    fn test_validate_zero_overlap_is_fine() {
        assert!(ChunkConfig::new(10, 0).validate().is_ok());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let config: ChunkConfig = serde_json::from_str(r#"{"max_tokens": 250}"#).unwrap();
        assert_eq!(config, ChunkConfig::new(250, 100));
    }

    struct MinimalChunker;

    impl Chunker for MinimalChunker {
        fn chunk(&self, _source: &str, _text: &str) -> Result<Vec<Chunk>> {
            Ok(vec![])
        }

        fn name(&self) -> &'static str {
            "minimal"
        }
    }

    #[test]
    fn test_chunker_default_methods() {
        let chunker = MinimalChunker;
        assert_eq!(chunker.description(), "No description available");
        assert!(chunker.validate().is_ok());
    }
}
