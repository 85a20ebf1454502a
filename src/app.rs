//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - picks the transcription backend
//! - runs the evaluation pipeline
//! - prints reports and writes output files

use clap::Parser;
use tracing::{info, warn};

use crate::cli::{Command, EvalArgs, ScoreArgs, ScoringArgs};
use crate::domain::EvalConfig;
use crate::error::AppError;
use crate::io::lexicon::{parse_delimiter, read_lexicon, write_lexicon};
use crate::transcribe::{CommandTranscriber, LexiconTranscriber, Transcriber};

pub mod pipeline;

/// Entry point for the `g2peval` binary.
pub fn run() -> Result<(), AppError> {
    // `g2peval esp test.lex hyp.lex diff.html` behaves like `g2peval eval ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    crate::logging::init_subscriber(&cli.log_level);

    match cli.command {
        Command::Eval(args) => handle_eval(args),
        Command::Score(args) => handle_score(args),
    }
}

fn handle_eval(args: EvalArgs) -> Result<(), AppError> {
    let config = eval_config_from_args(&args)?;
    let transcriber = build_transcriber(&config)?;
    let run = pipeline::run_eval(&config, transcriber.as_ref())?;

    report(&run, &config, true);

    write_lexicon(&config.hypothesis_lex, run.corpus.hypothesis(), config.delimiter)?;
    info!(path = %config.hypothesis_lex.display(), "wrote hypothesis lexicon");
    write_outputs(&run, &config, true)
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = score_config_from_args(&args)?;
    let run = pipeline::run_score(&config)?;

    report(&run, &config, false);
    write_outputs(&run, &config, false)
}

fn report(run: &pipeline::RunOutput, config: &EvalConfig, with_region: bool) {
    if run.skipped_rows > 0 {
        warn!(rows = run.skipped_rows, "skipped malformed lexicon rows");
    }

    let region = with_region.then(|| config.region.code());
    println!(
        "{}",
        crate::report::format_run_summary(&run.score.summary, &run.interval, region)
    );
    if config.top_n > 0 {
        println!("{}", crate::report::format_worst_entries(&run.worst));
    }
}

fn write_outputs(run: &pipeline::RunOutput, config: &EvalConfig, with_region: bool) -> Result<(), AppError> {
    if let Some(path) = &config.diff_table {
        crate::io::diff_table::write_diff_table(path, &run.diff_rows)?;
        info!(path = %path.display(), "wrote diff table");
    }
    if let Some(path) = &config.export_entries {
        crate::io::export::write_entries_csv(path, &run.corpus, &run.score.alignments)?;
    }
    if let Some(path) = &config.export_summary {
        let region = with_region.then_some(config.region);
        crate::io::export::write_summary_json(path, &run.score.summary, &run.interval, region)?;
    }
    Ok(())
}

/// Pick the engine backend: precomputed lexicon, explicit command, or `G2P_COMMAND`.
fn build_transcriber(config: &EvalConfig) -> Result<Box<dyn Transcriber>, AppError> {
    if let Some(path) = &config.g2p_lexicon {
        let lex = read_lexicon(path, config.delimiter)?;
        return Ok(Box::new(LexiconTranscriber::new(lex.entries)));
    }
    let transcriber = match &config.g2p_command {
        Some(cmd) => CommandTranscriber::from_command_line(cmd, config.region)?,
        None => CommandTranscriber::from_env(config.region)?,
    };
    Ok(Box::new(transcriber))
}

pub fn eval_config_from_args(args: &EvalArgs) -> Result<EvalConfig, AppError> {
    let mut config = scoring_config(&args.scoring)?;
    config.reference_lex = args.test_lex.clone();
    config.hypothesis_lex = args.hyp_lex.clone();
    config.diff_table = Some(args.diff_table.clone());
    config.region = args.region;
    config.g2p_command = args.g2p_command.clone();
    config.g2p_lexicon = args.g2p_lexicon.clone();
    config.phone_map = args.phone_map.clone();
    Ok(config)
}

pub fn score_config_from_args(args: &ScoreArgs) -> Result<EvalConfig, AppError> {
    let mut config = scoring_config(&args.scoring)?;
    config.reference_lex = args.ref_lex.clone();
    config.hypothesis_lex = args.hyp_lex.clone();
    config.diff_table = args.diff_table.clone();
    Ok(config)
}

fn scoring_config(args: &ScoringArgs) -> Result<EvalConfig, AppError> {
    Ok(EvalConfig {
        delimiter: parse_delimiter(&args.delim)?,
        resamples: args.resamples,
        confidence_level: args.confidence,
        seed: args.seed,
        top_n: args.top,
        export_entries: args.export.clone(),
        export_summary: args.export_summary.clone(),
        ..EvalConfig::default()
    })
}

/// Rewrite argv so a bare region argument means `eval`.
///
/// Rules:
/// - `g2peval esp a b c`            -> `g2peval eval esp a b c`
/// - `g2peval --help/--version/-h`  -> unchanged
/// - `g2peval eval|score ...`       -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    if matches!(arg1.as_str(), "eval" | "score" | "help") || arg1.starts_with('-') {
        return argv;
    }

    argv.insert(1, "eval".to_string());
    argv
}
