//! File reading and chunk writing.
//!
//! Input documents are read whole; files past a size threshold are
//! memory mapped instead of read through a buffer.

// Memory mapping requires unsafe but is well-documented and safe for read-only access
#![allow(unsafe_code)]

use crate::core::Chunk;
use crate::error::{IoError, Result};
use memmap2::Mmap;
use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Name of the manifest written next to chunk files.
pub const MANIFEST_FILE: &str = "manifest.json";

/// File reader with support for memory mapping.
///
/// - Small files (< 1MB): read directly into memory
/// - Large files (>= 1MB): memory mapped
///
/// The size is known after [`FileReader::open`], so callers can enforce
/// limits before any content is read.
///
/// # Examples
///
/// ```no_run
/// use studypack::io::FileReader;
///
/// let reader = FileReader::open("lecture.txt").unwrap();
/// assert!(reader.size() < 15 * 1024 * 1024);
/// let bytes = reader.read_to_bytes().unwrap();
/// ```
pub struct FileReader {
    file: File,
    size: u64,
    path: String,
}

impl FileReader {
    /// Opens a file for reading.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or can't be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        let path_str = path_ref.to_string_lossy().to_string();

        if !path_ref.exists() {
            return Err(IoError::FileNotFound { path: path_str }.into());
        }

        let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?;

        let size = file
            .metadata()
            .map_err(|e| IoError::ReadFailed {
                path: path_str.clone(),
                reason: e.to_string(),
            })?
            .len();

        Ok(Self {
            file,
            size,
            path: path_str,
        })
    }

    /// Returns the file size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Returns the file path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Reads the file content as bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn read_to_bytes(&self) -> Result<Vec<u8>> {
        if self.size >= MMAP_THRESHOLD {
            self.read_mmap_bytes()
        } else {
            self.read_direct_bytes()
        }
    }

    /// Reads the file content as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails or content is not valid UTF-8.
    pub fn read_to_string(&self) -> Result<String> {
        let bytes = self.read_to_bytes()?;
        String::from_utf8(bytes).map_err(|e| {
            IoError::ReadFailed {
                path: self.path.clone(),
                reason: format!("invalid UTF-8: {e}"),
            }
            .into()
        })
    }

    fn read_mmap_bytes(&self) -> Result<Vec<u8>> {
        tracing::trace!(path = %self.path, size = self.size, "memory mapping file");
        // Safety: We're only reading from the file, which is safe
        let mmap = unsafe {
            Mmap::map(&self.file).map_err(|e| IoError::MmapFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?
        };

        Ok(mmap.to_vec())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn read_direct_bytes(&self) -> Result<Vec<u8>> {
        let mut file = &self.file;
        let mut buffer = Vec::with_capacity(self.size as usize);
        file.read_to_end(&mut buffer)
            .map_err(|e| IoError::ReadFailed {
                path: self.path.clone(),
                reason: e.to_string(),
            })?;
        Ok(buffer)
    }
}

/// Reads a file to string.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid UTF-8.
///
/// # Examples
///
/// ```no_run
/// use studypack::io::read_file;
///
/// let content = read_file("notes.md").unwrap();
/// ```
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<String> {
    FileReader::open(path)?.read_to_string()
}

/// Writes content to a file, creating parent directories if needed.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if let Some(parent) = path_ref.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| IoError::DirectoryFailed {
            path: parent.to_string_lossy().to_string(),
            reason: e.to_string(),
        })?;
    }

    std::fs::write(path_ref, content).map_err(|e| IoError::WriteFailed {
        path: path_str,
        reason: e.to_string(),
    })?;

    Ok(())
}

/// One line of the chunk manifest.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry<'a> {
    /// File the chunk text was written to, relative to the output directory.
    pub file: String,
    /// Originating source.
    pub source: &'a str,
    /// Index within the source.
    pub chunk_index: usize,
    /// Estimated token cost.
    pub token_estimate: usize,
}

/// Writes each chunk's text to its own file plus a JSON manifest.
///
/// Files are named `{prefix}_{position:04}.txt`, where `position` is the
/// chunk's place in the global list (chunk indices restart per source,
/// so they cannot name files on their own). The manifest maps every file
/// back to its source and index.
///
/// # Returns
///
/// Paths of the written chunk files, in chunk order.
///
/// # Errors
///
/// Returns an error if directory creation or file writing fails.
pub fn write_chunks<P: AsRef<Path>>(out_dir: P, chunks: &[Chunk], prefix: &str) -> Result<Vec<String>> {
    let out_path = out_dir.as_ref();
    let out_str = out_path.to_string_lossy().to_string();

    if !out_path.exists() {
        std::fs::create_dir_all(out_path).map_err(|e| IoError::DirectoryFailed {
            path: out_str.clone(),
            reason: e.to_string(),
        })?;
    }

    let mut paths = Vec::with_capacity(chunks.len());
    let mut manifest = Vec::with_capacity(chunks.len());

    for (position, chunk) in chunks.iter().enumerate() {
        let filename = format!("{prefix}_{position:04}.txt");
        let file_path = out_path.join(&filename);
        let file_str = file_path.to_string_lossy().to_string();

        std::fs::write(&file_path, &chunk.text).map_err(|e| IoError::WriteFailed {
            path: file_str.clone(),
            reason: e.to_string(),
        })?;

        manifest.push(ManifestEntry {
            file: filename,
            source: &chunk.source,
            chunk_index: chunk.chunk_index,
            token_estimate: chunk.token_estimate,
        });
        paths.push(file_str);
    }

    let manifest_json = serde_json::to_string_pretty(&manifest).map_err(|e| IoError::WriteFailed {
        path: out_path.join(MANIFEST_FILE).to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    write_file(out_path.join(MANIFEST_FILE), &manifest_json)?;

    tracing::debug!(out_dir = %out_str, files = paths.len(), "wrote chunk files");
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_small_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("small.txt");
        std::fs::write(&file_path, "Hello, world!").unwrap();

        let content = read_file(&file_path).unwrap();
        assert_eq!(content, "Hello, world!");
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = read_file("/nonexistent/path/file.txt");
        assert!(matches!(
            result,
            Err(crate::error::Error::Io(IoError::FileNotFound { .. }))
        ));
    }

    #[test]
    fn test_file_reader_size_and_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test.txt");
        std::fs::write(&file_path, "Hello").unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert_eq!(reader.size(), 5);
        assert!(reader.path().contains("test.txt"));
    }

    #[test]
    fn test_read_to_bytes_binary() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bytes.bin");
        std::fs::write(&file_path, b"binary\x00data").unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert!(reader.size() < MMAP_THRESHOLD);
        assert_eq!(reader.read_to_bytes().unwrap(), b"binary\x00data");
    }

    #[test]
    fn test_read_large_file_mmap_path() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large.txt");
        let large_content = "x".repeat(1024 * 1024 + 512 * 1024);
        std::fs::write(&file_path, &large_content).unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert!(reader.size() >= MMAP_THRESHOLD);
        assert_eq!(reader.read_to_string().unwrap().len(), large_content.len());
    }

    #[test]
    fn test_read_invalid_utf8() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("invalid.bin");
        std::fs::write(&file_path, [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let reader = FileReader::open(&file_path).unwrap();
        assert!(reader.read_to_string().is_err());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a/b/c/deep.txt");

        write_file(&file_path, "Deep content").unwrap();
        assert_eq!(std::fs::read_to_string(&file_path).unwrap(), "Deep content");
    }

    #[test]
    fn test_write_chunks_with_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("chunks");
        let chunks = vec![
            Chunk::new("a.pdf", 0, "First chunk".to_string(), 2),
            Chunk::new("b.pdf", 0, "Second chunk".to_string(), 3),
        ];

        let paths = write_chunks(&out_dir, &chunks, "chunk").unwrap();

        assert_eq!(paths.len(), 2);
        assert!(paths[0].ends_with("chunk_0000.txt"));
        assert!(paths[1].ends_with("chunk_0001.txt"));
        assert_eq!(std::fs::read_to_string(&paths[1]).unwrap(), "Second chunk");

        let manifest = std::fs::read_to_string(out_dir.join(MANIFEST_FILE)).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest[1]["file"], "chunk_0001.txt");
        assert_eq!(manifest[1]["source"], "b.pdf");
        assert_eq!(manifest[1]["chunk_index"], 0);
        assert_eq!(manifest[1]["token_estimate"], 3);
    }

    #[test]
    fn test_write_chunks_empty() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("empty_chunks");

        let paths = write_chunks(&out_dir, &[], "chunk").unwrap();

        assert!(paths.is_empty());
        assert!(out_dir.join(MANIFEST_FILE).exists());
    }
}
