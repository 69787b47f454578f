//! The adarep engine: discovers Ada index files, merges them with prior
//! report state, optionally reconciles document files on disk, and writes
//! the consolidated report.
//!
//! Processing is sequential — one file fully merged before the next is
//! opened. The only suspension point is the caller's confirm-retry prompt
//! when the destination report is in use.

pub mod discover;
pub mod error;
pub mod reconcile;
pub mod run;

pub use error::{Error, Result};
pub use run::{RunOptions, RunSummary, run};
