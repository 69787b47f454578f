//! The Ada document record — one `<Ada>` element of an index file.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Runs of spaces, backslashes and forward slashes in a description.
static SEPARATOR_RUNS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"[ \\/]+").unwrap());

/// `_-_` sequences left over after separator replacement.
static DASH_RUNS: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"_-_+").unwrap());

/// One document record parsed from an index file.
///
/// Equality and `Hash` cover every field; a source file yielding two
/// byte-identical records stores only one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AdaDocument {
  /// Document ID, unique within one source file.
  pub ada_id:               i64,
  /// Issue date of the document.
  pub doc_date:             NaiveDate,
  /// Gimla classification code.
  pub gimla_code:           i32,
  /// Gimla classification label; carried data, not identity.
  pub gimla_description:    String,
  /// Document type code.
  pub doc_type:             i32,
  /// Document type label; carried data, not identity.
  pub doc_type_description: String,
  /// Optional event date; absent or unparseable on the wire yields `None`.
  pub event_date:           Option<NaiveDate>,
}

impl AdaDocument {
  /// The canonical on-disk name for this document's file (no extension):
  /// `<sanitised type label>-<type code>-<YYYY-MM-DD>-<id>`.
  pub fn new_file_name(&self) -> String {
    format!(
      "{}-{}-{}-{}",
      sanitize_description(&self.doc_type_description),
      self.doc_type,
      self.doc_date.format("%Y-%m-%d"),
      self.ada_id,
    )
  }
}

/// Flatten a type description into a file-name-safe token: trim, replace
/// runs of space/`\`/`/` with `_`, then collapse `_-_` runs to `-`.
pub fn sanitize_description(description: &str) -> String {
  let flattened = SEPARATOR_RUNS.replace_all(description.trim(), "_");
  DASH_RUNS.replace_all(&flattened, "-").into_owned()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  fn doc() -> AdaDocument {
    AdaDocument {
      ada_id:               42,
      doc_date:             NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
      gimla_code:           1,
      gimla_description:    "Pension".to_string(),
      doc_type:             7,
      doc_type_description: "Invoice".to_string(),
      event_date:           None,
    }
  }

  #[test]
  fn sanitize_replaces_separator_runs() {
    assert_eq!(sanitize_description("Invoice / Draft"), "Invoice_Draft");
  }

  #[test]
  fn sanitize_collapses_underscore_dash_runs() {
    assert_eq!(sanitize_description("X - Y"), "X-Y");
    assert_eq!(sanitize_description("X_-_Y"), "X-Y");
  }

  #[test]
  fn sanitize_trims_and_handles_backslashes() {
    assert_eq!(sanitize_description("  a\\b  "), "a_b");
  }

  #[test]
  fn new_file_name_from_fields() {
    assert_eq!(doc().new_file_name(), "Invoice-7-2024-03-05-42");
  }

  #[test]
  fn new_file_name_sanitises_label() {
    let mut d = doc();
    d.doc_type_description = "Invoice / Draft".to_string();
    assert_eq!(d.new_file_name(), "Invoice_Draft-7-2024-03-05-42");
  }
}
