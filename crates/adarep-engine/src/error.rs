//! Error types for the adarep engine.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The data path is missing or not a directory; reported before any
  /// processing starts.
  #[error("invalid data path: {0}")]
  InvalidDataPath(PathBuf),

  #[error(transparent)]
  Report(#[from] adarep_report::Error),

  /// A rename or leftover-cleanup action failed; aborts the run.
  #[error("renaming {path}: {source}")]
  Rename {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Deleting a processed index file failed; aborts the run.
  #[error("deleting {path}: {source}")]
  Delete {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
