//! Source documents.
//!
//! A source document is the output of a format extractor: one logical
//! input (an uploaded file or a manual text entry) reduced to a single
//! plain-text body plus basic structural metadata.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Source identifier used for manually entered text.
pub const MANUAL_TEXT_SOURCE: &str = "manual_text";

/// Document formats understood by the ingestion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Portable Document Format.
    Pdf,
    /// Word document.
    Docx,
    /// PowerPoint presentation.
    Pptx,
    /// Plain text (files or manual entry).
    Text,
}

impl SourceKind {
    /// Resolves a kind from a file extension, case-insensitively.
    ///
    /// Legacy `doc`/`ppt` extensions map onto their XML successors.
    ///
    /// # Examples
    ///
    /// ```
    /// use studypack::core::SourceKind;
    ///
    /// assert_eq!(SourceKind::from_extension("PDF"), Some(SourceKind::Pdf));
    /// assert_eq!(SourceKind::from_extension("ppt"), Some(SourceKind::Pptx));
    /// assert_eq!(SourceKind::from_extension("exe"), None);
    /// ```
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "doc" | "docx" => Some(Self::Docx),
            "ppt" | "pptx" => Some(Self::Pptx),
            "txt" | "text" | "md" | "markdown" => Some(Self::Text),
            _ => None,
        }
    }

    /// Resolves a kind from a file name or path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Maximum accepted input size in bytes.
    #[must_use]
    pub const fn max_size(self) -> u64 {
        match self {
            Self::Pptx => 30 * 1024 * 1024,
            Self::Pdf | Self::Docx | Self::Text => 15 * 1024 * 1024,
        }
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Pptx => "pptx",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Structural counters reported by an extractor (pages, slides, ...).
pub type SourceMetadata = BTreeMap<String, usize>;

/// One extracted input document.
///
/// # Examples
///
/// ```
/// use studypack::core::{SourceDocument, SourceKind};
///
/// let doc = SourceDocument::manual("Photosynthesis converts light.");
/// assert_eq!(doc.source, "manual_text");
/// assert_eq!(doc.kind, SourceKind::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Stable identifier (filename or [`MANUAL_TEXT_SOURCE`]).
    pub source: String,

    /// Document format.
    #[serde(rename = "type")]
    pub kind: SourceKind,

    /// Extracted plain text.
    pub text: String,

    /// Extractor-reported counters.
    pub metadata: SourceMetadata,
}

impl SourceDocument {
    /// Creates a document with empty metadata.
    #[must_use]
    pub fn new(source: impl Into<String>, kind: SourceKind, text: String) -> Self {
        Self {
            source: source.into(),
            kind,
            text,
            metadata: SourceMetadata::new(),
        }
    }

    /// Creates a manual text entry.
    ///
    /// The text is stored trimmed; the `characters` counter records the
    /// length of the text as entered.
    #[must_use]
    pub fn manual(text: &str) -> Self {
        let mut doc = Self::new(MANUAL_TEXT_SOURCE, SourceKind::Text, text.trim().to_string());
        doc.set_counter("characters", text.chars().count());
        doc
    }

    /// Sets a metadata counter.
    pub fn set_counter(&mut self, key: &str, value: usize) {
        self.metadata.insert(key.to_string(), value);
    }

    /// Adds a metadata counter, builder style.
    #[must_use]
    pub fn with_counter(mut self, key: &str, value: usize) -> Self {
        self.set_counter(key, value);
        self
    }

    /// Returns true if the text is empty or whitespace-only.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Returns the size of the text in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.text.len()
    }
}
