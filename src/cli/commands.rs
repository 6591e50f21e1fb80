//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::chunking::{estimate_tokens, split_sentences};
use crate::cli::output::{
    EstimateReport, OutputFormat, format_batch, format_chunks, format_estimate, format_sentences,
    format_write_chunks_result,
};
use crate::cli::parser::{BudgetArgs, Cli, Commands, InputArgs, SingleInputArgs};
use crate::core::MANUAL_TEXT_SOURCE;
use crate::error::{CommandError, Result};
use crate::ingest::{DocumentProcessor, ExtractorRegistry, ProcessedBatch};
use crate::io::unicode::grapheme_count;
use crate::io::{write_chunks, write_file};
use std::io::{self, Read};
use std::path::Path;

/// Executes the CLI command.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Chunk {
            input,
            budget,
            parallel,
        } => cmd_chunk(input, *budget, *parallel, format),
        Commands::Process {
            input,
            budget,
            parallel,
            output,
        } => cmd_process(input, *budget, *parallel, output.as_deref(), format),
        Commands::Estimate { input } => cmd_estimate(input, format),
        Commands::Sentences { input } => cmd_sentences(input, format),
        Commands::WriteChunks {
            input,
            budget,
            out_dir,
            prefix,
        } => cmd_write_chunks(input, *budget, out_dir, prefix, format),
    }
}

fn cmd_chunk(
    input: &InputArgs,
    budget: BudgetArgs,
    parallel: bool,
    format: OutputFormat,
) -> Result<String> {
    let batch = run_batch(input, budget, parallel)?;
    Ok(format_chunks(&batch.chunks, format))
}

fn cmd_process(
    input: &InputArgs,
    budget: BudgetArgs,
    parallel: bool,
    output: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let batch = run_batch(input, budget, parallel)?;

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&batch).map_err(CommandError::from)?;
        write_file(path, &json)?;
        tracing::info!(path = %path.display(), "wrote batch");
    }

    Ok(format_batch(&batch, format))
}

fn cmd_estimate(input: &SingleInputArgs, format: OutputFormat) -> Result<String> {
    let (source, text) = resolve_single(input)?;

    let report = EstimateReport {
        characters: text.chars().count(),
        graphemes: grapheme_count(&text),
        tokens: estimate_tokens(&text),
        paragraphs: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        source,
    };

    Ok(format_estimate(&report, format))
}

fn cmd_sentences(input: &SingleInputArgs, format: OutputFormat) -> Result<String> {
    let (_, text) = resolve_single(input)?;
    let sentences = split_sentences(&text)?;
    Ok(format_sentences(&sentences, format))
}

fn cmd_write_chunks(
    input: &InputArgs,
    budget: BudgetArgs,
    out_dir: &Path,
    prefix: &str,
    format: OutputFormat,
) -> Result<String> {
    if prefix.is_empty() || prefix.contains(['/', '\\']) {
        return Err(CommandError::InvalidArgument(format!(
            "prefix must be a non-empty file name fragment, got '{prefix}'"
        ))
        .into());
    }

    let batch = run_batch(input, budget, false)?;
    let paths = write_chunks(out_dir, &batch.chunks, prefix)?;

    Ok(format_write_chunks_result(&paths, format))
}

fn run_batch(input: &InputArgs, budget: BudgetArgs, parallel: bool) -> Result<ProcessedBatch> {
    let manual_text = input.text.as_deref().map(read_text_arg).transpose()?;

    DocumentProcessor::new()
        .config(budget.to_config())
        .parallel(parallel)
        .run(&input.files, manual_text.as_deref())
}

/// Resolves a single text input to `(source, text)`.
fn resolve_single(input: &SingleInputArgs) -> Result<(String, String)> {
    if let Some(path) = &input.file {
        let doc = ExtractorRegistry::new().extract_file(path)?;
        return Ok((doc.source, doc.text));
    }

    match input.text.as_deref() {
        Some(arg) => Ok((MANUAL_TEXT_SOURCE.to_string(), read_text_arg(arg)?)),
        None => Err(CommandError::MissingArgument("a FILE or --text".to_string()).into()),
    }
}

/// Returns the argument itself, or stdin's content for `-`.
fn read_text_arg(arg: &str) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| CommandError::ExecutionFailed(format!("Failed to read from stdin: {e}")))?;
    Ok(buffer)
}
