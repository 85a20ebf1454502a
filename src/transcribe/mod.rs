//! Adapters to the external grapheme-to-phoneme engine.
//!
//! The engine is a black box: words in, raw phone sequences out. This module
//! owns the boundary:
//!
//! - [`Transcriber`]: the seam every engine backend implements
//! - [`CommandTranscriber`]: runs an external program over stdin/stdout
//! - [`LexiconTranscriber`]: looks words up in precomputed engine output
//! - [`PhoneMap`]: normalizes raw engine symbols into the reference phone set

use tracing::info;

use crate::domain::LexiconEntry;
use crate::error::AppError;

pub mod command;
pub mod lexicon;
pub mod phone_map;

pub use command::CommandTranscriber;
pub use lexicon::LexiconTranscriber;
pub use phone_map::PhoneMap;

/// A grapheme-to-phoneme engine.
pub trait Transcriber {
    /// Return one raw pronunciation per word, in input order.
    fn transcribe(&self, words: &[String]) -> Result<Vec<Vec<String>>, AppError>;
}

/// Transcribe every reference word and normalize the output phones.
///
/// The result is positionally paired with `reference` and carries the same
/// orthography, ready to build a `Corpus`.
pub fn transcribe_lexicon(
    transcriber: &dyn Transcriber,
    reference: &[LexiconEntry],
    phone_map: &PhoneMap,
) -> Result<Vec<LexiconEntry>, AppError> {
    let words: Vec<String> = reference.iter().map(|e| e.orthography.clone()).collect();
    let raw = transcriber.transcribe(&words)?;
    if raw.len() != words.len() {
        return Err(AppError::new(
            4,
            format!(
                "Transcriber returned {} pronunciations for {} words.",
                raw.len(),
                words.len()
            ),
        ));
    }

    let hypothesis: Vec<LexiconEntry> = words
        .into_iter()
        .zip(raw)
        .map(|(word, pron)| LexiconEntry::new(word, phone_map.normalize(&pron)))
        .collect();

    info!(words = hypothesis.len(), "transcribed lexicon");
    Ok(hypothesis)
}
