//! Error types for the report boundary.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The destination file was in use and the caller declined to retry.
  #[error("report write aborted; destination in use: {0}")]
  Aborted(PathBuf),

  #[error("reading prior report: {0}")]
  Read(#[from] calamine::XlsxError),

  #[error("writing report: {0}")]
  Write(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
