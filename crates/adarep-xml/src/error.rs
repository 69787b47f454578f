//! Error types for the adarep-xml codec.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("missing required field `{0}` in Ada record")]
  MissingField(&'static str),

  #[error("invalid integer in `{field}`: {value:?}")]
  InvalidInteger { field: &'static str, value: String },

  #[error("invalid date in `{field}`: {value:?}")]
  InvalidDate { field: &'static str, value: String },

  #[error("`Ada` record not closed before end of document")]
  UnclosedRecord,

  #[error("XML error: {0}")]
  Xml(#[from] quick_xml::Error),

  #[error("reading index file: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
