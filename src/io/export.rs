//! Export per-entry results (CSV) and the run summary (JSON).
//!
//! The CSV is meant to be easy to consume in spreadsheets or downstream scripts;
//! the JSON carries the corpus totals and the bootstrap interval.

use std::fs::File;
use std::path::Path;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::{AlignmentResult, ConfidenceInterval, Corpus, Region, ScoreSummary};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct EntryRow<'a> {
    orthography: &'a str,
    reference: String,
    hypothesis: String,
    insertions: usize,
    deletions: usize,
    substitutions: usize,
    reference_length: usize,
    error_rate: Option<f64>,
}

/// Summary file written by `--export-summary`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryFile {
    pub tool: String,
    pub generated: DateTime<Local>,
    pub region: Option<Region>,
    pub summary: ScoreSummary,
    pub interval: ConfidenceInterval,
}

/// Write one CSV row per corpus entry.
pub fn write_entries_csv(path: &Path, corpus: &Corpus, alignments: &[AlignmentResult]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    for ((r, h), a) in corpus.pairs().zip(alignments) {
        let c = a.counts();
        writer
            .serialize(EntryRow {
                orthography: &r.orthography,
                reference: r.pronunciation.join(" "),
                hypothesis: h.pronunciation.join(" "),
                insertions: c.insertions,
                deletions: c.deletions,
                substitutions: c.substitutions,
                reference_length: c.reference_length(),
                error_rate: a.error_rate(),
            })
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the summary JSON file.
pub fn write_summary_json(
    path: &Path,
    summary: &ScoreSummary,
    interval: &ConfidenceInterval,
    region: Option<Region>,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create summary JSON '{}': {e}", path.display())))?;

    let out = SummaryFile {
        tool: "g2peval".to_string(),
        generated: Local::now(),
        region,
        summary: summary.clone(),
        interval: interval.clone(),
    };

    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write summary JSON: {e}")))?;
    Ok(())
}

/// Read a summary JSON file back.
pub fn read_summary_json(path: &Path) -> Result<SummaryFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open summary JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(file).map_err(|e| AppError::new(2, format!("Invalid summary JSON: {e}")))
}
