//! Reporting utilities: per-entry scores, rankings, and formatted terminal output.

use crate::domain::{AlignmentResult, Corpus};

pub mod format;

pub use format::*;

/// One entry's result, joined with its words for display.
#[derive(Debug, Clone)]
pub struct EntryScore {
    /// Position in the corpus.
    pub index: usize,
    pub orthography: String,
    pub reference: Vec<String>,
    pub hypothesis: Vec<String>,
    pub edits: usize,
    pub reference_length: usize,
    /// `None` when the reference pronunciation is empty.
    pub error_rate: Option<f64>,
}

/// Join corpus entries with their alignments.
pub fn entry_scores(corpus: &Corpus, alignments: &[AlignmentResult]) -> Vec<EntryScore> {
    corpus
        .pairs()
        .zip(alignments)
        .enumerate()
        .map(|(index, ((r, h), a))| {
            let c = a.counts();
            EntryScore {
                index,
                orthography: r.orthography.clone(),
                reference: r.pronunciation.clone(),
                hypothesis: h.pronunciation.clone(),
                edits: c.edits(),
                reference_length: c.reference_length(),
                error_rate: a.error_rate(),
            }
        })
        .collect()
}

/// Top-N entries with at least one edit, worst first.
///
/// Ordering: local error rate (undefined rates sort first), then edit count,
/// then corpus order.
pub fn rank_worst(scores: &[EntryScore], top_n: usize) -> Vec<EntryScore> {
    let mut sorted: Vec<EntryScore> = scores.iter().filter(|s| s.edits > 0).cloned().collect();
    sorted.sort_by(|a, b| {
        let ra = a.error_rate.unwrap_or(f64::INFINITY);
        let rb = b.error_rate.unwrap_or(f64::INFINITY);
        rb.partial_cmp(&ra)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(b.edits.cmp(&a.edits))
            .then(a.index.cmp(&b.index))
    });
    sorted.truncate(top_n);
    sorted
}
