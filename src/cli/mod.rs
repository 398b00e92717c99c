//! Command line interface.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cel-engine - evaluate CEL expressions with a compiled-program cache.
#[derive(Parser, Debug)]
#[command(name = "cel-engine")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file.
    #[arg(short, long, default_value = "cel-engine.toml")]
    pub config: PathBuf,

    /// Verbose mode.
    #[arg(short, long)]
    pub verbose: bool,

    /// Quiet mode.
    #[arg(short, long)]
    pub quiet: bool,

    /// Command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluates a single expression.
    Eval {
        /// CEL expression to evaluate.
        #[arg(short, long)]
        expression: String,

        /// Evaluation context as a JSON object.
        #[arg(long, default_value = "{}")]
        context: String,

        /// Cache identifier (enables program caching).
        #[arg(short, long)]
        identifier: Option<String>,
    },

    /// Evaluates a batch of requests from a JSON file.
    Batch {
        /// File containing a JSON array of requests.
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Writes a default configuration file.
    Init {
        /// Target directory (default: current directory).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Shows version.
    Version,
}
