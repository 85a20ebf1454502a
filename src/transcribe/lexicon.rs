//! Transcriber backed by a precomputed engine-output lexicon.
//!
//! Useful when the engine was run elsewhere: its output lexicon may be in any
//! order and may cover more words than the test set. When a word appears more
//! than once, the first pronunciation wins.

use std::collections::HashMap;

use crate::domain::LexiconEntry;
use crate::error::AppError;
use crate::transcribe::Transcriber;

#[derive(Debug, Clone, Default)]
pub struct LexiconTranscriber {
    prons: HashMap<String, Vec<String>>,
}

impl LexiconTranscriber {
    pub fn new(entries: Vec<LexiconEntry>) -> Self {
        let mut prons = HashMap::with_capacity(entries.len());
        for e in entries {
            prons.entry(e.orthography).or_insert(e.pronunciation);
        }
        Self { prons }
    }

    pub fn len(&self) -> usize {
        self.prons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prons.is_empty()
    }
}

impl Transcriber for LexiconTranscriber {
    fn transcribe(&self, words: &[String]) -> Result<Vec<Vec<String>>, AppError> {
        words
            .iter()
            .map(|w| {
                self.prons
                    .get(w)
                    .cloned()
                    .ok_or_else(|| AppError::new(2, format!("No pronunciation for '{w}' in engine output lexicon.")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_in_any_order_first_wins() {
        let t = LexiconTranscriber::new(vec![
            LexiconEntry::from_str_pron("sol", "s o_7 l"),
            LexiconEntry::from_str_pron("casa", "k a_7 . s a"),
            LexiconEntry::from_str_pron("sol", "z o l"),
        ]);
        assert_eq!(t.len(), 2);
        let out = t.transcribe(&["casa".to_string(), "sol".to_string()]).unwrap();
        assert_eq!(out[0], vec!["k", "a_7", ".", "s", "a"]);
        assert_eq!(out[1], vec!["s", "o_7", "l"]);
    }

    #[test]
    fn missing_word_is_an_error() {
        let t = LexiconTranscriber::new(vec![LexiconEntry::from_str_pron("sol", "s o l")]);
        let err = t.transcribe(&["luna".to_string()]).unwrap_err();
        assert!(err.to_string().contains("'luna'"));
    }
}
