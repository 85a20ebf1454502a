//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - lexicon values (`LexiconEntry`, `Corpus`)
//! - alignment outputs (`EditOp`, `AlignmentResult`, `DiffCell`)
//! - corpus-level results (`ScoreSummary`, `ConfidenceInterval`)
//! - run configuration (`Region`, `EvalConfig`)

pub mod types;

pub use types::*;
