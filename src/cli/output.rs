//! Output formatting for CLI commands.
//!
//! Supports text, pretty JSON, and newline-delimited JSON output.

use crate::core::Chunk;
use crate::error::Error;
use crate::ingest::ProcessedBatch;
use crate::io::preview;
use serde::Serialize;
use std::fmt::Write;

/// Graphemes of chunk text shown per row in text output.
const PREVIEW_WIDTH: usize = 48;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Pretty-printed JSON output.
    Json,
    /// One compact JSON value per line.
    Ndjson,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "ndjson" | "jsonl" => Self::Ndjson,
            _ => Self::Text,
        }
    }
}

/// Token and size figures for a single text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EstimateReport {
    /// Source identifier.
    pub source: String,
    /// Unicode scalar values.
    pub characters: usize,
    /// Grapheme clusters.
    pub graphemes: usize,
    /// Estimated tokens.
    pub tokens: usize,
    /// Non-empty blank-line separated paragraphs.
    pub paragraphs: usize,
}

/// Formats a chunk list.
#[must_use]
pub fn format_chunks(chunks: &[Chunk], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_chunks_text(chunks),
        OutputFormat::Json => format_json(&chunks),
        OutputFormat::Ndjson => format_ndjson(chunks),
    }
}

fn format_chunks_text(chunks: &[Chunk]) -> String {
    if chunks.is_empty() {
        return "No chunks produced.\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(
        output,
        "{:<24} {:<6} {:<7} Preview",
        "Source", "Index", "Tokens"
    );
    output.push_str(&"-".repeat(90));
    output.push('\n');

    for chunk in chunks {
        let _ = writeln!(
            output,
            "{:<24} {:<6} {:<7} {}",
            preview(&chunk.source, 24),
            chunk.chunk_index,
            chunk.token_estimate,
            preview(&chunk.text, PREVIEW_WIDTH)
        );
    }

    let total: usize = chunks.iter().map(|c| c.token_estimate).sum();
    let _ = writeln!(output, "\n{} chunks, ~{total} tokens", chunks.len());
    output
}

/// Formats a processed batch.
///
/// NDJSON emits the batch metadata on the first line and one chunk per
/// following line.
#[must_use]
pub fn format_batch(batch: &ProcessedBatch, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_batch_text(batch),
        OutputFormat::Json => format_json(batch),
        OutputFormat::Ndjson => {
            let mut output = format_ndjson(std::slice::from_ref(&batch.metadata));
            output.push_str(&format_ndjson(&batch.chunks));
            output
        }
    }
}

fn format_batch_text(batch: &ProcessedBatch) -> String {
    let meta = &batch.metadata;
    let mut output = String::new();
    output.push_str("Batch\n");
    output.push_str("=====\n\n");
    let _ = writeln!(output, "  Sources:     {}", meta.total_sources);
    let _ = writeln!(output, "  Chunks:      {}", meta.total_chunks);
    let _ = writeln!(output, "  Characters:  {}", meta.total_characters);

    if !meta.sources.is_empty() {
        output.push_str("\nSources:\n");
        for source in &meta.sources {
            let chunks = batch
                .chunks
                .iter()
                .filter(|c| c.source == source.name)
                .count();
            let counters = source
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(", ");
            let _ = writeln!(
                output,
                "  {:<24} {:<5} {chunks:>4} chunks  {counters}",
                preview(&source.name, 24),
                source.kind,
            );
        }
    }

    output
}

/// Formats a token estimate.
#[must_use]
pub fn format_estimate(report: &EstimateReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Source:      {}", report.source);
            let _ = writeln!(output, "Characters:  {}", report.characters);
            let _ = writeln!(output, "Graphemes:   {}", report.graphemes);
            let _ = writeln!(output, "Paragraphs:  {}", report.paragraphs);
            let _ = writeln!(output, "Tokens:      ~{}", report.tokens);
            output
        }
        OutputFormat::Json => format_json(report),
        OutputFormat::Ndjson => format_ndjson(std::slice::from_ref(report)),
    }
}

/// Formats a sentence split.
#[must_use]
pub fn format_sentences(sentences: &[&str], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "{} sentences:", sentences.len());
            for (i, sentence) in sentences.iter().enumerate() {
                let _ = writeln!(output, "  [{i}] {}", sentence.replace('\n', "\\n"));
            }
            output
        }
        OutputFormat::Json => format_json(&sentences),
        OutputFormat::Ndjson => format_ndjson(sentences),
    }
}

/// Formats write chunks result.
#[must_use]
pub fn format_write_chunks_result(paths: &[String], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => {
            let mut output = String::new();
            let _ = writeln!(output, "Wrote {} chunks:", paths.len());
            for path in paths {
                let _ = writeln!(output, "  {path}");
            }
            output
        }
        OutputFormat::Json => format_json(&paths),
        OutputFormat::Ndjson => format_ndjson(paths),
    }
}

/// Formats an error for display.
///
/// JSON formats produce `{"error": ..., "kind": ...}`.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    #[derive(Serialize)]
    struct ErrorOutput {
        error: String,
        kind: &'static str,
    }

    let kind = match error {
        Error::Chunking(_) => "chunking",
        Error::Ingest(_) => "ingest",
        Error::Io(_) => "io",
        Error::Command(_) => "command",
    };
    let body = ErrorOutput {
        error: error.to_string(),
        kind,
    };

    match format {
        OutputFormat::Text => body.error,
        OutputFormat::Json => format_json(&body),
        OutputFormat::Ndjson => serde_json::to_string(&body).unwrap_or_else(|_| "{}".to_string()),
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    let mut json = serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string());
    json.push('\n');
    json
}

/// Formats values as newline-delimited JSON.
fn format_ndjson<T: Serialize>(values: &[T]) -> String {
    let mut output = String::new();
    for value in values {
        if let Ok(line) = serde_json::to_string(value) {
            output.push_str(&line);
            output.push('\n');
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;

    fn sample_chunks() -> Vec<Chunk> {
        vec![
            Chunk::new("a.txt", 0, "Alpha one.\n\nAlpha two.".to_string(), 5),
            Chunk::new("b.txt", 0, "Beta.".to_string(), 1),
        ]
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::parse("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::parse("ndjson"), OutputFormat::Ndjson);
        assert_eq!(OutputFormat::parse("jsonl"), OutputFormat::Ndjson);
        assert_eq!(OutputFormat::parse("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::parse("unknown"), OutputFormat::Text);
    }

    #[test]
    fn test_format_chunks_text() {
        let text = format_chunks(&sample_chunks(), OutputFormat::Text);
        assert!(text.contains("Alpha one. Alpha two."));
        assert!(text.contains("2 chunks, ~6 tokens"));
        assert_eq!(
            format_chunks(&[], OutputFormat::Text),
            "No chunks produced.\n"
        );
    }

    #[test]
    fn test_format_chunks_ndjson() {
        let ndjson = format_chunks(&sample_chunks(), OutputFormat::Ndjson);
        let lines: Vec<&str> = ndjson.lines().collect();
        assert_eq!(lines.len(), 2);
        let second: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second["source"], "b.txt");
        assert_eq!(second["token_estimate"], 1);
    }

    #[test]
    fn test_format_chunks_json() {
        let json = format_chunks(&sample_chunks(), OutputFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["text"], "Alpha one.\n\nAlpha two.");
    }

    #[test]
    fn test_format_sentences() {
        let text = format_sentences(&["One", "Two."], OutputFormat::Text);
        assert!(text.starts_with("2 sentences:"));
        assert!(text.contains("[1] Two."));
    }

    #[test]
    fn test_format_estimate() {
        let report = EstimateReport {
            source: "manual_text".to_string(),
            characters: 13,
            graphemes: 13,
            tokens: 3,
            paragraphs: 1,
        };
        assert!(format_estimate(&report, OutputFormat::Text).contains("Tokens:      ~3"));
        let json: serde_json::Value =
            serde_json::from_str(&format_estimate(&report, OutputFormat::Json)).unwrap();
        assert_eq!(json["tokens"], 3);
    }

    #[test]
    fn test_format_error() {
        let err = Error::from(IngestError::NoInput);
        assert!(format_error(&err, OutputFormat::Text).contains("no input"));

        let json: serde_json::Value =
            serde_json::from_str(&format_error(&err, OutputFormat::Json)).unwrap();
        assert_eq!(json["kind"], "ingest");
        assert!(json["error"].as_str().unwrap().contains("no input"));

        assert!(!format_error(&err, OutputFormat::Ndjson).contains('\n'));
    }
}
