//! Shared evaluation pipeline used by both `eval` and `score`.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! lexicons -> corpus -> alignment/scoring -> bootstrap -> classification -> rankings
//!
//! The CLI layer then only prints and writes files.

use tracing::info;

use crate::domain::{ConfidenceInterval, Corpus, EvalConfig, LexiconEntry};
use crate::error::AppError;
use crate::io::diff_table::DiffRow;
use crate::io::lexicon::read_lexicon;
use crate::report::{EntryScore, entry_scores, rank_worst};
use crate::score::{CorpusScore, classify, estimate, score};
use crate::transcribe::{PhoneMap, Transcriber, transcribe_lexicon};

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub corpus: Corpus,
    pub score: CorpusScore,
    pub interval: ConfidenceInterval,
    pub entries: Vec<EntryScore>,
    pub worst: Vec<EntryScore>,
    pub diff_rows: Vec<DiffRow>,
    /// Lexicon rows skipped while reading (both sides).
    pub skipped_rows: usize,
}

/// Transcribe the reference lexicon with `transcriber`, then score it.
pub fn run_eval(config: &EvalConfig, transcriber: &dyn Transcriber) -> Result<RunOutput, AppError> {
    let reference = read_lexicon(&config.reference_lex, config.delimiter)?;
    let phone_map = match &config.phone_map {
        Some(path) => PhoneMap::load(path)?,
        None => PhoneMap::default(),
    };

    info!(
        entries = reference.entries.len(),
        region = config.region.code(),
        "transcribing reference lexicon"
    );
    let hypothesis = transcribe_lexicon(transcriber, &reference.entries, &phone_map)?;

    let skipped = reference.row_errors.len();
    score_lexicons(reference.entries, hypothesis, config, skipped)
}

/// Score two existing lexicons against each other.
pub fn run_score(config: &EvalConfig) -> Result<RunOutput, AppError> {
    let reference = read_lexicon(&config.reference_lex, config.delimiter)?;
    let hypothesis = read_lexicon(&config.hypothesis_lex, config.delimiter)?;
    let skipped = reference.row_errors.len() + hypothesis.row_errors.len();
    score_lexicons(reference.entries, hypothesis.entries, config, skipped)
}

/// Corpus construction, scoring, bootstrap, classification and ranking.
pub fn score_lexicons(
    reference: Vec<LexiconEntry>,
    hypothesis: Vec<LexiconEntry>,
    config: &EvalConfig,
    skipped_rows: usize,
) -> Result<RunOutput, AppError> {
    let corpus = Corpus::new(reference, hypothesis)?;
    let score = score(&corpus)?;
    let interval = estimate(
        &score.alignments,
        config.resamples,
        config.confidence_level,
        config.seed,
    )?;

    info!(
        per = score.summary.error_rate,
        lower = interval.lower_bound,
        upper = interval.upper_bound,
        "scored corpus"
    );

    let diff_rows: Vec<DiffRow> = corpus
        .reference()
        .iter()
        .zip(&score.alignments)
        .map(|(entry, alignment)| DiffRow {
            orthography: entry.orthography.clone(),
            cells: classify(alignment),
        })
        .collect();

    let entries = entry_scores(&corpus, &score.alignments);
    let worst = rank_worst(&entries, config.top_n);

    Ok(RunOutput {
        corpus,
        score,
        interval,
        entries,
        worst,
        diff_rows,
        skipped_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::{Path, PathBuf};

    use crate::domain::DiffLabel;
    use crate::transcribe::LexiconTranscriber;

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).expect("create");
        f.write_all(contents.as_bytes()).expect("write");
        path
    }

    fn config(reference_lex: PathBuf, hypothesis_lex: PathBuf) -> EvalConfig {
        EvalConfig {
            reference_lex,
            hypothesis_lex,
            seed: Some(42),
            resamples: 200,
            ..EvalConfig::default()
        }
    }

    #[test]
    fn scores_two_lexicons() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let r = write(dir.path(), "ref.lex", "casa K A1 S A\nsol S O1 L\nmar M A1 R\n");
        let h = write(dir.path(), "hyp.lex", "casa K A1 S A\nsol S O L\nmar M A1\n");

        let out = run_score(&config(r, h)).unwrap();
        let s = &out.score.summary;
        assert_eq!(s.reference_length, 10);
        assert_eq!(s.substitutions, 1);
        assert_eq!(s.deletions, 1);
        assert!((s.error_rate - 0.2).abs() < 1e-12);
        assert!(out.interval.lower_bound <= out.interval.upper_bound);
        assert_eq!(out.diff_rows.len(), 3);
        assert_eq!(out.diff_rows[2].cells[2].label, DiffLabel::Delete);
        assert_eq!(out.worst.len(), 2);
        assert_eq!(out.skipped_rows, 0);
    }

    #[test]
    fn mismatched_lexicons_fail_with_index() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let r = write(dir.path(), "ref.lex", "casa K A1 S A\nsol S O1 L\n");
        let h = write(dir.path(), "hyp.lex", "casa K A1 S A\nluz L U1 S\n");

        let err = run_score(&config(r, h)).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("entry 1"));
        assert!(err.to_string().contains("'sol'"));
    }

    #[test]
    fn eval_normalizes_engine_output() {
        let dir = tempfile::tempdir().expect("tmpdir");
        let r = write(dir.path(), "ref.lex", "llave LJ A1 BH E\nchico CH I1 K O\n");
        let engine = LexiconTranscriber::new(vec![
            LexiconEntry::from_str_pron("chico", "tS i_7 . k o"),
            LexiconEntry::from_str_pron("llave", "Z a_7 . V e"),
        ]);

        let out = run_eval(&config(r, dir.path().join("hyp.lex")), &engine).unwrap();
        assert_eq!(out.corpus.hypothesis()[0].pronunciation, vec!["J", "A1", "BH", "E"]);
        assert_eq!(out.score.summary.substitutions, 1);
        assert_eq!(out.worst[0].orthography, "llave");
    }
}
