//! Command-line parsing for the G2P evaluator.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! scoring code. Library code consumes an `EvalConfig`, never these structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Region;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "g2peval", version, about = "Phone error rate evaluation for G2P engines")]
pub struct Cli {
    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Transcribe a test lexicon with the G2P engine, score it, and write the diff table.
    Eval(EvalArgs),
    /// Score an existing hypothesis lexicon against a reference lexicon.
    Score(ScoreArgs),
}

/// Options shared by `eval` and `score`.
#[derive(Debug, Args, Clone)]
pub struct ScoringArgs {
    /// Lexicon field delimiter (`tab` for MFA-style lexicons).
    #[arg(long, default_value = " ")]
    pub delim: String,

    /// Number of bootstrap resamples.
    #[arg(long, default_value_t = 1000)]
    pub resamples: usize,

    /// Confidence level of the bootstrap interval.
    #[arg(long, default_value_t = 0.95)]
    pub confidence: f64,

    /// Random seed for the bootstrap (omit for a fresh seed each run).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Show the top-N worst entries.
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Export per-entry results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export the summary and interval to JSON.
    #[arg(long = "export-summary")]
    pub export_summary: Option<PathBuf>,
}

/// Options for `eval`.
#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Dialect region passed to the engine.
    #[arg(value_enum)]
    pub region: Region,

    /// Test lexicon with reference pronunciations.
    pub test_lex: PathBuf,

    /// File to write predicted pronunciations.
    pub hyp_lex: PathBuf,

    /// File to write the HTML diff table.
    pub diff_table: PathBuf,

    /// Engine command line (words on stdin, pronunciations on stdout). Falls back to G2P_COMMAND.
    #[arg(long = "g2p-command")]
    pub g2p_command: Option<String>,

    /// Precomputed engine output lexicon to use instead of running a command.
    #[arg(long = "g2p-lexicon", conflicts_with = "g2p_command")]
    pub g2p_lexicon: Option<PathBuf>,

    /// JSON phone map applied to engine output (default: built-in MexBET -> Kaldi).
    #[arg(long = "phone-map")]
    pub phone_map: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Options for `score`.
#[derive(Debug, Args, Clone)]
pub struct ScoreArgs {
    /// Reference lexicon.
    pub ref_lex: PathBuf,

    /// Hypothesis lexicon (same words, same order).
    pub hyp_lex: PathBuf,

    /// Optional HTML diff table output.
    #[arg(long = "diff-table")]
    pub diff_table: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}
