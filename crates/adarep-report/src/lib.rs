//! Spreadsheet boundary for adarep.
//!
//! Reads prior report state with `calamine` and writes the consolidated
//! report with `rust_xlsxwriter`. The writer rebuilds the workbook wholesale
//! each run — the catalog exports every table in full, so replacing the file
//! is equivalent to clearing and rewriting each sheet.

pub mod error;
mod read;
mod write;

pub use error::{Error, Result};
pub use read::{PriorState, read_prior_state};
pub use write::{ConflictPrompt, ReportTables, write_report};

/// Fixed sheet names of the report layout.
pub mod sheet {
  pub const GIMLA_TYPES: &str = "GimlaTypes";
  pub const DOC_TYPES: &str = "DocTypes";
  pub const GIMLA_TO_DOC: &str = "Gimla2Doc";
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use std::path::Path;

  use adarep_core::{DocumentType, GimlaToDocument, GimlaType};

  use super::*;

  struct NeverRetry;

  impl ConflictPrompt for NeverRetry {
    fn confirm_retry(&self, _path: &Path) -> bool {
      false
    }
  }

  fn tables() -> ReportTables {
    ReportTables {
      gimla_types: vec![
        GimlaType {
          code:        10,
          description: "Pension".to_string(),
        },
        GimlaType {
          code:        20,
          description: "Medical".to_string(),
        },
      ],
      doc_types:   vec![DocumentType {
        code:        7,
        description: "Invoice".to_string(),
      }],
      mappings:    vec![
        GimlaToDocument {
          gimla_code:        10,
          gimla_description: "Pension".to_string(),
          doc_type:          7,
          doc_description:   "Invoice".to_string(),
        },
        GimlaToDocument {
          gimla_code:        20,
          gimla_description: "Medical".to_string(),
          doc_type:          7,
          doc_description:   "Invoice".to_string(),
        },
      ],
    }
  }

  #[test]
  fn write_then_read_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    write_report(&path, &tables(), &NeverRetry).unwrap();
    let prior = read_prior_state(&path).unwrap();

    assert_eq!(prior.gimla_rows, vec![
      (10, "Pension".to_string()),
      (20, "Medical".to_string()),
    ]);
    assert_eq!(prior.doc_rows, vec![(7, "Invoice".to_string())]);
    assert_eq!(prior.mapping_rows, vec![(10, 7), (20, 7)]);
  }

  #[test]
  fn missing_report_reads_as_empty() {
    let dir = tempfile::tempdir().unwrap();
    let prior = read_prior_state(&dir.path().join("absent.xlsx")).unwrap();
    assert!(prior.gimla_rows.is_empty());
    assert!(prior.doc_rows.is_empty());
    assert!(prior.mapping_rows.is_empty());
  }

  #[test]
  fn unwritable_destination_aborts_without_output() {
    let dir = tempfile::tempdir().unwrap();
    // A directory at the destination path cannot be opened for writing, so
    // the in-use probe trips and the declined prompt aborts the save.
    let path = dir.path().join("report.xlsx");
    std::fs::create_dir(&path).unwrap();

    let err = write_report(&path, &tables(), &NeverRetry).unwrap_err();
    assert!(matches!(err, Error::Aborted(_)));
    assert!(std::fs::read_dir(&path).unwrap().next().is_none());
  }

  #[test]
  fn empty_tables_still_produce_a_readable_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    write_report(&path, &ReportTables::default(), &NeverRetry).unwrap();
    let prior = read_prior_state(&path).unwrap();
    assert!(prior.gimla_rows.is_empty());
    assert!(prior.mapping_rows.is_empty());
  }
}
