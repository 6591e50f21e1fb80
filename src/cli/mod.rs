//! CLI layer for studypack.
//!
//! Provides the command-line interface using clap, with commands for
//! chunking, batch processing, and inspecting texts.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
