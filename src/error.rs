//! Error types for studypack operations.
//!
//! This module provides the error hierarchy using `thiserror` for
//! chunking, ingestion, I/O, and CLI commands.

use thiserror::Error;

/// Result type alias for studypack operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Chunking-related errors (configuration, text processing).
    #[error("chunking error: {0}")]
    Chunking(#[from] ChunkingError),

    /// Ingestion errors (input validation, extraction).
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// I/O errors (file operations).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),
}

/// Chunking-specific errors.
#[derive(Error, Debug)]
pub enum ChunkingError {
    /// Invalid chunk configuration.
    #[error("invalid chunk configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// Overlap budget is not smaller than the chunk budget.
    #[error("overlap of {overlap} tokens must be less than max_tokens {max_tokens}")]
    OverlapTooLarge {
        /// Overlap budget in tokens.
        overlap: usize,
        /// Chunk budget in tokens.
        max_tokens: usize,
    },

    /// Regex compilation error.
    #[error("regex error: {0}")]
    Regex(String),
}

/// Errors raised while turning raw inputs into source documents.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Neither files nor manual text were supplied.
    #[error("no input provided; supply files or manual text")]
    NoInput,

    /// More documents than a single batch accepts.
    #[error("maximum {max} documents allowed, got {count}")]
    TooManyDocuments {
        /// Number of documents supplied.
        count: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// Manual text exceeds the character limit.
    #[error("manual text is {length} characters, limit is {max}")]
    ManualTextTooLong {
        /// Character count of the supplied text.
        length: usize,
        /// Maximum accepted.
        max: usize,
    },

    /// File extension does not map to a known document kind.
    #[error("unsupported file type: .{extension}")]
    UnsupportedFileType {
        /// The offending extension (lowercased, may be empty).
        extension: String,
    },

    /// File exceeds the size limit for its kind.
    #[error("{name} is {size} bytes, limit for {kind} is {max} bytes")]
    FileTooLarge {
        /// Source name.
        name: String,
        /// Document kind.
        kind: String,
        /// Actual size in bytes.
        size: u64,
        /// Maximum size in bytes.
        max: u64,
    },

    /// No extractor registered for a document kind.
    #[error("no extractor registered for {kind} documents ({name})")]
    NoExtractor {
        /// Source name.
        name: String,
        /// Document kind.
        kind: String,
    },

    /// The extractor produced no text.
    #[error("{name} contains no extractable text")]
    NoExtractableText {
        /// Source name.
        name: String,
    },

    /// The extractor rejected the document.
    #[error("failed to extract {name}: {reason}")]
    ExtractionFailed {
        /// Source name.
        name: String,
        /// Reason for failure.
        reason: String,
    },
}

/// I/O-specific errors for file operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Missing required argument.
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<regex::Error> for ChunkingError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Self::Chunking(err.into())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunking_error_display() {
        let err = ChunkingError::OverlapTooLarge {
            overlap: 100,
            max_tokens: 50,
        };
        assert_eq!(
            err.to_string(),
            "overlap of 100 tokens must be less than max_tokens 50"
        );

        let err = ChunkingError::InvalidConfig {
            reason: "max_tokens must be > 0".to_string(),
        };
        assert!(err.to_string().contains("max_tokens must be > 0"));
    }

    #[test]
    fn test_ingest_error_display() {
        let err = IngestError::TooManyDocuments { count: 7, max: 5 };
        assert_eq!(err.to_string(), "maximum 5 documents allowed, got 7");

        let err = IngestError::UnsupportedFileType {
            extension: "exe".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported file type: .exe");

        let err = IngestError::NoExtractor {
            name: "slides.pptx".to_string(),
            kind: "pptx".to_string(),
        };
        assert!(err.to_string().contains("slides.pptx"));
        assert!(err.to_string().contains("pptx"));

        let err = IngestError::ManualTextTooLong {
            length: 10_001,
            max: 10_000,
        };
        assert!(err.to_string().contains("10001"));
    }

    #[test]
    fn test_io_error_display() {
        let err = IoError::FileNotFound {
            path: "/tmp/notes.txt".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/notes.txt");

        let err = IoError::WriteFailed {
            path: "/tmp/out".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::MissingArgument("--text".to_string());
        assert_eq!(err.to_string(), "missing required argument: --text");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(IoError::Generic(_))));
    }

    #[test]
    fn test_error_from_variants() {
        let err: Error = ChunkingError::Regex("bad".to_string()).into();
        assert!(matches!(err, Error::Chunking(_)));

        let err: Error = IngestError::NoInput.into();
        assert!(matches!(err, Error::Ingest(_)));

        let err: Error = CommandError::ExecutionFailed("boom".to_string()).into();
        assert!(matches!(err, Error::Command(_)));
    }

    #[test]
    #[allow(clippy::invalid_regex)]
    fn test_from_regex_error() {
        let regex_err = regex::Regex::new("[invalid").unwrap_err();
        let err: Error = regex_err.into();
        assert!(matches!(err, Error::Chunking(ChunkingError::Regex(_))));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: CommandError = json_err.into();
        assert!(matches!(err, CommandError::OutputFormat(_)));
    }
}
