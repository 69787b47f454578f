//! Row types for the three report tables.
//!
//! `GimlaType` and `DocumentType` are identified by their `code` alone; the
//! description is payload. `GimlaToDocument` rows are derived from the
//! catalog's ownership relation at export time and never stored
//! independently.

/// A Gimla classification — one row of the `GimlaTypes` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GimlaType {
  pub code:        i32,
  pub description: String,
}

/// A document type — one row of the `DocTypes` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentType {
  pub code:        i32,
  pub description: String,
}

/// A (Gimla, document type) association — one row of the `Gimla2Doc` sheet.
/// Keyed by the two codes; the descriptions are denormalised for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GimlaToDocument {
  pub gimla_code:        i32,
  pub gimla_description: String,
  pub doc_type:          i32,
  pub doc_description:   String,
}
