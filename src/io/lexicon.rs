//! Pronunciation lexicon read/write.
//!
//! Two layouts are supported, selected by the field delimiter:
//!
//! - **tab** (MFA style): `word\t...\tp1 p2 p3`; the pronunciation is the last
//!   tab field, split on whitespace
//! - **anything else** (ProsodyLab style, default space): `word p1 p2 p3`; every
//!   field after the word is a phone
//!
//! Whitespace around a line is ignored, so blank fields at either end of a row
//! are dropped before the word and pronunciation are picked. Tab rows without a
//! pronunciation field are skipped and reported; they never abort the read.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::domain::LexiconEntry;
use crate::error::AppError;

/// A row-level problem encountered while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Reader output: entries in file order plus anything that was skipped.
#[derive(Debug, Clone)]
pub struct LexiconFile {
    pub entries: Vec<LexiconEntry>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Parse a delimiter flag: a single ASCII byte, or `tab` / `\t` / `space`.
pub fn parse_delimiter(raw: &str) -> Result<u8, AppError> {
    match raw {
        "\t" | "\\t" | "tab" | "TAB" => Ok(b'\t'),
        " " | "space" => Ok(b' '),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        s => Err(AppError::new(
            2,
            format!("Invalid lexicon delimiter '{s}': expected a single ASCII character or 'tab'."),
        )),
    }
}

/// Read a lexicon file.
pub fn read_lexicon(path: &Path, delimiter: u8) -> Result<LexiconFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open lexicon '{}': {e}", path.display())))?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let mut entries = Vec::new();
    let mut row_errors = Vec::new();
    let mut rows_read = 0usize;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(rows_read + 1);
                rows_read += 1;
                row_errors.push(RowError {
                    line,
                    message: format!("Lexicon parse error: {e}"),
                });
                continue;
            }
        };
        rows_read += 1;
        let line = record.position().map(|p| p.line() as usize).unwrap_or(rows_read);

        let trimmed: Vec<&str> = record.iter().map(str::trim).collect();
        let Some(first) = trimmed.iter().position(|f| !f.is_empty()) else {
            continue;
        };
        let last = trimmed.iter().rposition(|f| !f.is_empty()).unwrap_or(first);
        let fields = &trimmed[first..=last];
        let word = fields[0];

        let pronunciation: Vec<String> = if delimiter == b'\t' {
            if fields.len() < 2 {
                row_errors.push(RowError {
                    line,
                    message: "Missing pronunciation field.".to_string(),
                });
                continue;
            }
            fields[fields.len() - 1].split_whitespace().map(str::to_string).collect()
        } else {
            fields[1..]
                .iter()
                .filter(|f| !f.is_empty())
                .map(|f| f.to_string())
                .collect()
        };

        if pronunciation.is_empty() {
            warn!(line, word, "lexicon entry has an empty pronunciation");
        }

        entries.push(LexiconEntry::new(word, pronunciation));
    }

    for err in &row_errors {
        warn!(line = err.line, "{}", err.message);
    }

    if entries.is_empty() {
        return Err(AppError::new(
            3,
            format!("No valid entries in lexicon '{}'.", path.display()),
        ));
    }

    debug!(path = %path.display(), entries = entries.len(), rows_read, "read lexicon");

    Ok(LexiconFile {
        entries,
        row_errors,
        rows_read,
    })
}

/// Write `word{delim}p1 p2 ...` lines.
pub fn write_lexicon(path: &Path, entries: &[LexiconEntry], delimiter: u8) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create lexicon '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    let delim = delimiter as char;

    for entry in entries {
        writeln!(out, "{}{delim}{}", entry.orthography, entry.pronunciation.join(" "))
            .map_err(|e| AppError::new(2, format!("Failed to write lexicon row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush lexicon '{}': {e}", path.display())))?;

    Ok(())
}
