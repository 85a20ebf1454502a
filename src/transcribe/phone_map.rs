//! Phone-symbol normalization for engine output.
//!
//! The engine emits SAMPA-style MexBET symbols with syllable boundaries; the
//! reference lexicons use Kaldi-style uppercase labels. Normalization is:
//!
//! 1. drop boundary markers (default `.`)
//! 2. remap through the symbol table (unmapped symbols pass through)
//! 3. uppercase, if enabled
//!
//! A `PhoneMap` is an immutable value handed to whoever normalizes; it can be
//! replaced with a JSON file via `--phone-map`.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

const MEXBET_TO_KALDI: &[(&str, &str)] = &[
    ("V", "BH"),
    ("D", "DH"),
    ("G", "GH"),
    ("x", "H"),
    ("tS", "CH"),
    ("Z", "J"),
    ("L", "LJ"),
    ("r(", "R"),
    ("r", "RR"),
    ("n~", "NJ"),
    ("N", "NG"),
    ("i_7", "I1"),
    ("e_7", "E1"),
    ("a_7", "A1"),
    ("o_7", "O1"),
    ("u_7", "U1"),
    // Mexican-only phones.
    ("S", "SH"),
    ("tl", "TL"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneMap {
    #[serde(default)]
    pub map: BTreeMap<String, String>,
    #[serde(default = "default_drop")]
    pub drop: Vec<String>,
    #[serde(default = "default_uppercase")]
    pub uppercase: bool,
}

fn default_drop() -> Vec<String> {
    vec![".".to_string()]
}

fn default_uppercase() -> bool {
    true
}

impl Default for PhoneMap {
    fn default() -> Self {
        Self::mexbet_to_kaldi()
    }
}

impl PhoneMap {
    /// Built-in MexBET → Kaldi table.
    pub fn mexbet_to_kaldi() -> Self {
        Self {
            map: MEXBET_TO_KALDI
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            drop: default_drop(),
            uppercase: default_uppercase(),
        }
    }

    /// Pass symbols through untouched.
    pub fn identity() -> Self {
        Self {
            map: BTreeMap::new(),
            drop: Vec::new(),
            uppercase: false,
        }
    }

    /// Load a phone map from JSON, e.g. `{"map": {"x": "H"}, "drop": ["."], "uppercase": true}`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open phone map '{}': {e}", path.display())))?;
        serde_json::from_reader(file)
            .map_err(|e| AppError::new(2, format!("Invalid phone map '{}': {e}", path.display())))
    }

    pub fn normalize(&self, raw: &[String]) -> Vec<String> {
        raw.iter()
            .filter(|p| !self.drop.iter().any(|d| d == *p))
            .map(|p| {
                let mapped = self.map.get(p).map(String::as_str).unwrap_or(p.as_str());
                if self.uppercase {
                    mapped.to_uppercase()
                } else {
                    mapped.to_string()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn raw(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn default_map_drops_boundaries_and_uppercases() {
        let map = PhoneMap::default();
        assert_eq!(map.normalize(&raw("p e . r( o")), raw("P E R O"));
        assert_eq!(map.normalize(&raw("p e . r o")), raw("P E RR O"));
        assert_eq!(map.normalize(&raw("n~ a_7 . n~ u")), raw("NJ A1 NJ U"));
        assert_eq!(map.normalize(&raw("x a_7 . D a")), raw("H A1 DH A"));
    }

    #[test]
    fn identity_passes_through() {
        assert_eq!(PhoneMap::identity().normalize(&raw("a . b")), raw("a . b"));
    }

    #[test]
    fn loads_partial_json_with_defaults() {
        let mut f = tempfile::NamedTempFile::new().expect("tmpfile");
        f.write_all(br#"{"map": {"T": "Z"}}"#).expect("write");
        let map = PhoneMap::load(f.path()).unwrap();
        assert_eq!(map.drop, vec!["."]);
        assert!(map.uppercase);
        assert_eq!(map.normalize(&raw("T e . s")), raw("Z E S"));
    }

    #[test]
    fn rejects_malformed_json() {
        let mut f = tempfile::NamedTempFile::new().expect("tmpfile");
        f.write_all(b"{not json").expect("write");
        assert_eq!(PhoneMap::load(f.path()).unwrap_err().exit_code(), 2);
    }
}
