//! Shared domain types.
//!
//! These types are plain values so they can be:
//!
//! - produced by the lexicon reader and the transcription adapter
//! - passed through alignment, scoring and resampling
//! - exported to JSON/CSV or rendered as an HTML diff

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// A single phoneme label. Compared by exact string equality.
pub type Symbol = String;

/// One word of a lexicon with its pronunciation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub orthography: String,
    pub pronunciation: Vec<Symbol>,
}

impl LexiconEntry {
    pub fn new(orthography: impl Into<String>, pronunciation: Vec<Symbol>) -> Self {
        Self {
            orthography: orthography.into(),
            pronunciation,
        }
    }

    /// Convenience constructor from a space-separated pronunciation.
    pub fn from_str_pron(orthography: &str, pron: &str) -> Self {
        Self::new(orthography, pron.split_whitespace().map(str::to_string).collect())
    }
}

/// Reference and hypothesis lexicons paired by position.
///
/// Construction validates that both sides have the same length and the same
/// orthography at every index.
#[derive(Debug, Clone)]
pub struct Corpus {
    reference: Vec<LexiconEntry>,
    hypothesis: Vec<LexiconEntry>,
}

impl Corpus {
    pub fn new(reference: Vec<LexiconEntry>, hypothesis: Vec<LexiconEntry>) -> Result<Self, ScoringError> {
        if reference.len() != hypothesis.len() {
            return Err(ScoringError::MismatchedCorpus {
                index: reference.len().min(hypothesis.len()),
                reason: format!(
                    "reference has {} entries, hypothesis has {}",
                    reference.len(),
                    hypothesis.len()
                ),
            });
        }

        for (index, (r, h)) in reference.iter().zip(hypothesis.iter()).enumerate() {
            if r.orthography != h.orthography {
                return Err(ScoringError::MismatchedCorpus {
                    index,
                    reason: format!("orthography '{}' vs '{}'", r.orthography, h.orthography),
                });
            }
        }

        Ok(Self { reference, hypothesis })
    }

    pub fn len(&self) -> usize {
        self.reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reference.is_empty()
    }

    pub fn reference(&self) -> &[LexiconEntry] {
        &self.reference
    }

    pub fn hypothesis(&self) -> &[LexiconEntry] {
        &self.hypothesis
    }

    /// Iterate `(reference, hypothesis)` pairs in corpus order.
    pub fn pairs(&self) -> impl Iterator<Item = (&LexiconEntry, &LexiconEntry)> {
        self.reference.iter().zip(self.hypothesis.iter())
    }
}

/// One step of an alignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Match(Symbol),
    /// Symbol present only in the hypothesis.
    Insertion(Symbol),
    /// Symbol present only in the reference.
    Deletion(Symbol),
    /// `(reference, hypothesis)`.
    Substitution(Symbol, Symbol),
}

/// Per-kind edit-operation counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OpCounts {
    pub matches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
}

impl OpCounts {
    /// Insertions + deletions + substitutions.
    pub fn edits(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }

    /// Number of reference symbols covered (matches + deletions + substitutions).
    pub fn reference_length(&self) -> usize {
        self.matches + self.deletions + self.substitutions
    }

    pub fn add(&mut self, other: &OpCounts) {
        self.matches += other.matches;
        self.insertions += other.insertions;
        self.deletions += other.deletions;
        self.substitutions += other.substitutions;
    }
}

/// Minimum-cost alignment of one reference/hypothesis pair, left to right.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AlignmentResult {
    pub ops: Vec<EditOp>,
}

impl AlignmentResult {
    pub fn counts(&self) -> OpCounts {
        let mut c = OpCounts::default();
        for op in &self.ops {
            match op {
                EditOp::Match(_) => c.matches += 1,
                EditOp::Insertion(_) => c.insertions += 1,
                EditOp::Deletion(_) => c.deletions += 1,
                EditOp::Substitution(_, _) => c.substitutions += 1,
            }
        }
        c
    }

    pub fn edits(&self) -> usize {
        self.counts().edits()
    }

    pub fn reference_length(&self) -> usize {
        self.counts().reference_length()
    }

    /// Local error rate for this entry, `None` when the reference is empty.
    pub fn error_rate(&self) -> Option<f64> {
        let c = self.counts();
        let ref_len = c.reference_length();
        if ref_len == 0 {
            return None;
        }
        Some(c.edits() as f64 / ref_len as f64)
    }
}

/// Corpus-level totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub entries: usize,
    pub matches: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub substitutions: usize,
    pub reference_length: usize,
    pub error_rate: f64,
}

impl ScoreSummary {
    pub fn edits(&self) -> usize {
        self.insertions + self.deletions + self.substitutions
    }
}

/// Percentile-bootstrap interval for the error rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub point_estimate: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub confidence_level: f64,
    pub resamples: usize,
    /// Standard deviation of the resampled rates.
    pub standard_error: f64,
}

/// Visual class of one aligned position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffLabel {
    Match,
    Insert,
    Delete,
    Substitute,
}

/// `(label, reference slot, hypothesis slot)`; `None` is a blank slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffCell {
    pub label: DiffLabel,
    pub reference: Option<Symbol>,
    pub hypothesis: Option<Symbol>,
}

/// Dialect region passed to the transcription engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    /// Peninsular Spanish: distinción, no yeísmo.
    Esp,
    /// Latin American Spanish: seseo, yeísmo.
    Latam,
}

impl Region {
    pub fn code(self) -> &'static str {
        match self {
            Region::Esp => "esp",
            Region::Latam => "latam",
        }
    }

    /// Whether /θ/ and /s/ are distinguished.
    pub fn distincion(self) -> bool {
        matches!(self, Region::Esp)
    }

    /// Whether /ʎ/ merges into /ʝ/.
    pub fn yeismo(self) -> bool {
        matches!(self, Region::Latam)
    }
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults and `.env`).
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Reference (test) lexicon.
    pub reference_lex: PathBuf,
    /// Hypothesis lexicon: written by `eval`, read by `score`.
    pub hypothesis_lex: PathBuf,
    pub diff_table: Option<PathBuf>,
    pub delimiter: u8,

    pub region: Region,
    pub g2p_command: Option<String>,
    /// Precomputed engine output used instead of running `g2p_command`.
    pub g2p_lexicon: Option<PathBuf>,
    pub phone_map: Option<PathBuf>,

    pub resamples: usize,
    pub confidence_level: f64,
    pub seed: Option<u64>,

    pub top_n: usize,
    pub export_entries: Option<PathBuf>,
    pub export_summary: Option<PathBuf>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            reference_lex: PathBuf::new(),
            hypothesis_lex: PathBuf::new(),
            diff_table: None,
            delimiter: b' ',
            region: Region::Latam,
            g2p_command: None,
            g2p_lexicon: None,
            phone_map: None,
            resamples: 1000,
            confidence_level: 0.95,
            seed: None,
            top_n: 20,
            export_entries: None,
            export_summary: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(w: &str, p: &str) -> LexiconEntry {
        LexiconEntry::from_str_pron(w, p)
    }

    #[test]
    fn corpus_rejects_length_mismatch() {
        let err = Corpus::new(vec![entry("a", "A"), entry("b", "B")], vec![entry("a", "A")]).unwrap_err();
        assert!(matches!(err, ScoringError::MismatchedCorpus { index: 1, .. }));
    }

    #[test]
    fn corpus_rejects_orthography_mismatch() {
        let err = Corpus::new(
            vec![entry("casa", "K A S A"), entry("perro", "P E RR O")],
            vec![entry("casa", "K A S A"), entry("pero", "P E R O")],
        )
        .unwrap_err();
        match err {
            ScoringError::MismatchedCorpus { index, reason } => {
                assert_eq!(index, 1);
                assert!(reason.contains("perro"));
                assert!(reason.contains("pero"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn counts_and_reference_length() {
        let result = AlignmentResult {
            ops: vec![
                EditOp::Match("A".into()),
                EditOp::Substitution("B".into(), "X".into()),
                EditOp::Insertion("Y".into()),
                EditOp::Deletion("C".into()),
            ],
        };
        let c = result.counts();
        assert_eq!(c.matches, 1);
        assert_eq!(c.substitutions, 1);
        assert_eq!(c.insertions, 1);
        assert_eq!(c.deletions, 1);
        assert_eq!(c.edits(), 3);
        assert_eq!(result.reference_length(), 3);
        assert_eq!(result.error_rate(), Some(1.0));
        assert_eq!(AlignmentResult::default().error_rate(), None);
    }

    #[test]
    fn region_flags() {
        assert!(Region::Esp.distincion());
        assert!(!Region::Esp.yeismo());
        assert!(!Region::Latam.distincion());
        assert!(Region::Latam.yeismo());
    }
}
