//! Format extractors.
//!
//! An extractor turns the raw bytes of one input file into a
//! [`SourceDocument`]. Plain text is handled here; binary formats (PDF,
//! Word, PowerPoint) are registered by the embedding application through
//! [`ExtractorRegistry::register`].

use crate::core::{SourceDocument, SourceKind};
use crate::error::{IngestError, Result};
use crate::io::FileReader;
use crate::io::unicode::{strip_bom, validate_utf8};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Converts raw document bytes into plain text.
pub trait Extractor: Send + Sync {
    /// The document kind this extractor handles.
    fn kind(&self) -> SourceKind;

    /// Extracts text from `bytes`.
    ///
    /// `name` becomes the document's source identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::ExtractionFailed`] if the bytes cannot be
    /// decoded.
    fn extract(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument>;
}

/// Extractor for UTF-8 text and Markdown files.
///
/// Blank-line separated blocks are trimmed and rejoined with a single
/// blank line; blocks that are only whitespace are dropped.
///
/// Metadata: `characters` (as read), `lines`, `paragraphs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl Extractor for PlainTextExtractor {
    fn kind(&self) -> SourceKind {
        SourceKind::Text
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<SourceDocument> {
        let raw = validate_utf8(bytes).map_err(|offset| IngestError::ExtractionFailed {
            name: name.to_string(),
            reason: format!("invalid UTF-8 at byte {offset}"),
        })?;
        let raw = strip_bom(raw);

        let paragraphs: Vec<&str> = raw
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        Ok(SourceDocument::new(name, SourceKind::Text, paragraphs.join("\n\n"))
            .with_counter("characters", raw.chars().count())
            .with_counter("lines", raw.lines().count())
            .with_counter("paragraphs", paragraphs.len()))
    }
}

/// Routes documents to the extractor registered for their kind.
///
/// # Examples
///
/// ```
/// use studypack::core::SourceKind;
/// use studypack::ingest::ExtractorRegistry;
///
/// let registry = ExtractorRegistry::new();
/// let doc = registry
///     .extract("notes.txt", SourceKind::Text, b"Cells divide.\n\nThen grow.")
///     .unwrap();
/// assert_eq!(doc.metadata["paragraphs"], 2);
/// assert!(registry.extract("a.pdf", SourceKind::Pdf, b"%PDF").is_err());
/// ```
pub struct ExtractorRegistry {
    extractors: HashMap<SourceKind, Box<dyn Extractor>>,
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.extractors.keys().map(|k| k.as_str()).collect();
        kinds.sort_unstable();
        f.debug_struct("ExtractorRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorRegistry {
    /// Creates a registry with the built-in plain-text extractor.
    #[must_use]
    pub fn new() -> Self {
        Self::empty().with(PlainTextExtractor)
    }

    /// Creates a registry with no extractors.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Registers an extractor, replacing any previous one for its kind.
    pub fn register(&mut self, extractor: Box<dyn Extractor>) {
        self.extractors.insert(extractor.kind(), extractor);
    }

    /// Registers an extractor, builder style.
    #[must_use]
    pub fn with<X: Extractor + 'static>(mut self, extractor: X) -> Self {
        self.register(Box::new(extractor));
        self
    }

    /// Returns true if an extractor is registered for `kind`.
    #[must_use]
    pub fn supports(&self, kind: SourceKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Extracts an in-memory document.
    ///
    /// # Errors
    ///
    /// - [`IngestError::FileTooLarge`] if `bytes` exceeds the kind's limit
    /// - [`IngestError::NoExtractor`] if no extractor handles `kind`
    /// - [`IngestError::NoExtractableText`] if the result is blank
    pub fn extract(&self, name: &str, kind: SourceKind, bytes: &[u8]) -> Result<SourceDocument> {
        check_size(name, kind, bytes.len() as u64)?;

        let extractor = self
            .extractors
            .get(&kind)
            .ok_or_else(|| IngestError::NoExtractor {
                name: name.to_string(),
                kind: kind.to_string(),
            })?;

        let doc = extractor.extract(name, bytes)?;
        if doc.is_blank() {
            return Err(IngestError::NoExtractableText {
                name: name.to_string(),
            }
            .into());
        }

        tracing::debug!(
            source = name,
            kind = %kind,
            bytes = bytes.len(),
            chars = doc.text.chars().count(),
            "extracted document"
        );
        Ok(doc)
    }

    /// Reads and extracts a file, naming the document by its file name.
    ///
    /// The size limit is checked before the file is read.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFileType`] for unknown
    /// extensions, I/O errors from reading, and any error from
    /// [`ExtractorRegistry::extract`].
    pub fn extract_file(&self, path: &Path) -> Result<SourceDocument> {
        let name = path
            .file_name()
            .map_or_else(|| path.to_string_lossy(), |n| n.to_string_lossy())
            .to_string();

        let kind = SourceKind::from_path(path).ok_or_else(|| IngestError::UnsupportedFileType {
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
        })?;

        let reader = FileReader::open(path)?;
        check_size(&name, kind, reader.size())?;
        let bytes = reader.read_to_bytes()?;

        self.extract(&name, kind, &bytes)
    }
}

fn check_size(name: &str, kind: SourceKind, size: u64) -> Result<()> {
    let max = kind.max_size();
    if size > max {
        return Err(IngestError::FileTooLarge {
            name: name.to_string(),
            kind: kind.to_string(),
            size,
            max,
        }
        .into());
    }
    Ok(())
}
