//! `g2p-eval` library crate.
//!
//! The binary (`g2peval`) is a thin wrapper around this library so that:
//!
//! - alignment and scoring are testable without spawning processes
//! - the scoring core is reusable from other evaluation tools
//! - I/O plumbing stays out of the algorithms

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod report;
pub mod score;
pub mod transcribe;
