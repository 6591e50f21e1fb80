//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::chunking::{ChunkConfig, DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP_TOKENS};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// studypack: turn course material into token-bounded chunks.
///
/// Reads lecture notes and other documents, splits them into
/// paragraph-aligned chunks sized for a language model, and reports the
/// result as text or JSON.
#[derive(Parser, Debug)]
#[command(name = "studypack")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json, ndjson).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Documents making up one batch.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Input files (.txt, .md; .pdf/.docx/.pptx need a registered extractor).
    pub files: Vec<PathBuf>,

    /// Manual text added as an extra source (`-` reads stdin).
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Token budgets.
#[derive(Args, Debug, Clone, Copy)]
pub struct BudgetArgs {
    /// Maximum estimated tokens per chunk.
    #[arg(long, env = "STUDYPACK_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    pub max_tokens: usize,

    /// Estimated tokens of trailing context carried into the next chunk.
    #[arg(long, env = "STUDYPACK_OVERLAP_TOKENS", default_value_t = DEFAULT_OVERLAP_TOKENS)]
    pub overlap_tokens: usize,
}

impl Default for BudgetArgs {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap_tokens: DEFAULT_OVERLAP_TOKENS,
        }
    }
}

impl BudgetArgs {
    /// Converts the flags into a chunk configuration.
    #[must_use]
    pub const fn to_config(self) -> ChunkConfig {
        ChunkConfig::new(self.max_tokens, self.overlap_tokens)
    }
}

/// A single text to inspect.
#[derive(Args, Debug, Clone, Default)]
pub struct SingleInputArgs {
    /// Input file.
    pub file: Option<PathBuf>,

    /// Text to inspect instead of a file (`-` reads stdin).
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk documents and list the chunks.
    Chunk {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Chunk sources on a thread pool.
        #[arg(long)]
        parallel: bool,
    },

    /// Extract and chunk documents, reporting the full batch.
    Process {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Chunk sources on a thread pool.
        #[arg(long)]
        parallel: bool,

        /// Also write the batch as JSON to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Estimate the token cost of a text.
    Estimate {
        #[command(flatten)]
        input: SingleInputArgs,
    },

    /// Split a text into sentences.
    Sentences {
        #[command(flatten)]
        input: SingleInputArgs,
    },

    /// Chunk documents and write each chunk to its own file.
    WriteChunks {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        budget: BudgetArgs,

        /// Output directory.
        #[arg(short, long, default_value = "chunks")]
        out_dir: PathBuf,

        /// Filename prefix.
        #[arg(long, default_value = "chunk")]
        prefix: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chunk_defaults() {
        let cli = Cli::try_parse_from(["studypack", "chunk", "a.txt", "b.md"]).unwrap();
        assert_eq!(cli.format, "text");
        match cli.command {
            Commands::Chunk {
                input,
                budget,
                parallel,
            } => {
                assert_eq!(input.files.len(), 2);
                assert!(input.text.is_none());
                assert_eq!(budget.to_config(), ChunkConfig::default());
                assert!(!parallel);
            }
            other => unreachable!("parsed {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "studypack",
            "process",
            "--text",
            "notes",
            "--max-tokens",
            "200",
            "--format",
            "json",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.format, "json");
        assert!(matches!(
            cli.command,
            Commands::Process { budget: BudgetArgs { max_tokens: 200, overlap_tokens: 100 }, .. }
        ));
    }

    #[test]
    fn test_single_input_conflict() {
        let result = Cli::try_parse_from(["studypack", "estimate", "a.txt", "--text", "hi"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_write_chunks_defaults() {
        let cli = Cli::try_parse_from(["studypack", "write-chunks", "a.txt"]).unwrap();
        match cli.command {
            Commands::WriteChunks {
                out_dir, prefix, ..
            } => {
                assert_eq!(out_dir, PathBuf::from("chunks"));
                assert_eq!(prefix, "chunk");
            }
            other => unreachable!("parsed {other:?}"),
        }
    }
}
