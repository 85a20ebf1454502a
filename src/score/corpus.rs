//! Corpus-level scoring: align every entry and aggregate the counts.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{AlignmentResult, Corpus, OpCounts, ScoreSummary};
use crate::error::ScoringError;
use crate::score::align::align;

/// Output of [`score`].
#[derive(Debug, Clone)]
pub struct CorpusScore {
    pub summary: ScoreSummary,
    /// One alignment per corpus entry, in corpus order.
    pub alignments: Vec<AlignmentResult>,
}

/// Align every `(reference, hypothesis)` pair and compute the phone error rate.
///
/// Entries are aligned in parallel; the ordered `collect` keeps corpus order.
pub fn score(corpus: &Corpus) -> Result<CorpusScore, ScoringError> {
    if corpus.is_empty() {
        return Err(ScoringError::EmptyCorpus);
    }

    let alignments: Vec<AlignmentResult> = corpus
        .reference()
        .par_iter()
        .zip(corpus.hypothesis().par_iter())
        .map(|(r, h)| align(&r.pronunciation, &h.pronunciation))
        .collect();

    let summary = summarize(&alignments)?;
    debug!(
        entries = summary.entries,
        edits = summary.edits(),
        reference_length = summary.reference_length,
        "scored corpus"
    );

    Ok(CorpusScore { summary, alignments })
}

/// Aggregate per-entry alignments into a [`ScoreSummary`].
pub fn summarize(alignments: &[AlignmentResult]) -> Result<ScoreSummary, ScoringError> {
    if alignments.is_empty() {
        return Err(ScoringError::EmptyCorpus);
    }

    let mut totals = OpCounts::default();
    for a in alignments {
        totals.add(&a.counts());
    }

    let reference_length = totals.reference_length();
    if reference_length == 0 {
        return Err(ScoringError::UndefinedErrorRate);
    }

    Ok(ScoreSummary {
        entries: alignments.len(),
        matches: totals.matches,
        insertions: totals.insertions,
        deletions: totals.deletions,
        substitutions: totals.substitutions,
        reference_length,
        error_rate: totals.edits() as f64 / reference_length as f64,
    })
}
