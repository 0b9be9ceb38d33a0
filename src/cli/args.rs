//! Command line argument parsing for the thaifreq CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// thaifreq - word frequency and part-of-speech analysis for Thai text
#[derive(Parser, Debug, Clone)]
#[command(name = "thaifreq")]
#[command(about = "Word frequency and part-of-speech analysis for Thai/English text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ThaifreqArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Analyzer configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "THAIFREQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Durable cache directory (overrides the configuration)
    #[arg(long, value_name = "DIR", env = "THAIFREQ_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ThaifreqArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Analyze texts and report word frequencies
    Analyze(AnalyzeArgs),

    /// Show durable cache statistics
    Stats(StatsArgs),

    /// Delete every durable cache entry
    #[command(name = "clear-cache")]
    ClearCache(ClearCacheArgs),
}

/// Arguments for analyzing texts
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Texts to analyze
    #[arg(value_name = "TEXT")]
    pub texts: Vec<String>,

    /// Files to analyze, one text per file
    #[arg(short, long = "input", value_name = "FILE")]
    pub inputs: Vec<PathBuf>,

    /// Number of most frequent words to show
    #[arg(short = 'n', long, default_value = "10")]
    pub top: usize,

    /// Count every word, not only accepted parts of speech
    #[arg(long)]
    pub no_filter_pos: bool,

    /// Accepted part-of-speech tags (comma separated)
    #[arg(short, long = "tags", value_delimiter = ',', value_name = "TAG")]
    pub tags: Vec<String>,

    /// Analyze the texts on the worker pool
    #[arg(short, long)]
    pub parallel: bool,

    /// Keep going when a text fails and report it per text
    #[arg(long)]
    pub keep_going: bool,

    /// Disable the cache entirely
    #[arg(long)]
    pub no_cache: bool,

    /// Append one JSON line per analyzed text to this file
    #[arg(long, value_name = "FILE")]
    pub save_jsonl: Option<PathBuf>,

    /// Title stored with saved results
    #[arg(long)]
    pub title: Option<String>,
}

/// Arguments for cache statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {}

/// Arguments for clearing the cache
#[derive(Parser, Debug, Clone)]
pub struct ClearCacheArgs {}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
