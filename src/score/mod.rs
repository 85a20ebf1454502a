//! Alignment and scoring core.
//!
//! Responsibilities:
//!
//! - align one reference/hypothesis phone pair (`align`)
//! - aggregate a whole corpus into a phone error rate (`corpus`)
//! - bootstrap a confidence interval over entries (`bootstrap`)
//! - label aligned positions for the diff table (`classify`)

pub mod align;
pub mod bootstrap;
pub mod classify;
pub mod corpus;

pub use align::{align, edit_distance};
pub use bootstrap::estimate;
pub use classify::classify;
pub use corpus::{CorpusScore, score, summarize};
