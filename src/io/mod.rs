//! Input/output helpers.
//!
//! - lexicon read/write (`lexicon`)
//! - HTML diff table (`diff_table`)
//! - result exports (CSV/JSON) (`export`)

pub mod diff_table;
pub mod export;
pub mod lexicon;

pub use diff_table::*;
pub use export::*;
pub use lexicon::*;
