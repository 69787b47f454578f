//! Prior-state reader: the three sheets of an existing report, as raw rows.

use std::path::Path;

use calamine::{Data, DataType, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::{
  error::Result,
  sheet,
};

/// Raw rows recovered from an existing report file. Header rows are already
/// skipped; resolution against the catalog happens in the engine.
#[derive(Debug, Default)]
pub struct PriorState {
  /// (code, description) rows from the `GimlaTypes` sheet.
  pub gimla_rows:   Vec<(i32, String)>,
  /// (code, description) rows from the `DocTypes` sheet.
  pub doc_rows:     Vec<(i32, String)>,
  /// (gimla code, doc type code) rows from the `Gimla2Doc` sheet; the
  /// denormalised description columns are ignored on read.
  pub mapping_rows: Vec<(i32, i32)>,
}

/// Read prior report state from `path`.
///
/// A missing file or a missing sheet yields empty rows; rows whose code
/// cells are not numeric are skipped.
pub fn read_prior_state(path: &Path) -> Result<PriorState> {
  if !path.exists() {
    debug!(path = %path.display(), "no prior report, starting empty");
    return Ok(PriorState::default());
  }

  let mut workbook: Xlsx<_> = open_workbook(path)?;
  Ok(PriorState {
    gimla_rows:   read_code_rows(&mut workbook, sheet::GIMLA_TYPES),
    doc_rows:     read_code_rows(&mut workbook, sheet::DOC_TYPES),
    mapping_rows: read_mapping_rows(&mut workbook, sheet::GIMLA_TO_DOC),
  })
}

fn read_code_rows<R>(
  workbook: &mut Xlsx<R>,
  name: &str,
) -> Vec<(i32, String)>
where
  R: std::io::Read + std::io::Seek,
{
  let Ok(range) = workbook.worksheet_range(name) else {
    return Vec::new();
  };
  range
    .rows()
    .skip(1)
    .filter_map(|row| {
      let code = row.first().and_then(Data::as_i64)? as i32;
      let description = row
        .get(1)
        .and_then(|c| c.as_string())
        .unwrap_or_default();
      Some((code, description))
    })
    .collect()
}

fn read_mapping_rows<R>(workbook: &mut Xlsx<R>, name: &str) -> Vec<(i32, i32)>
where
  R: std::io::Read + std::io::Seek,
{
  let Ok(range) = workbook.worksheet_range(name) else {
    return Vec::new();
  };
  range
    .rows()
    .skip(1)
    .filter_map(|row| {
      // Sheet layout: Gimla Code, Gimla Description, Doc Type, Doc
      // Description. Only the two code columns identify the row.
      let gimla_code = row.first().and_then(Data::as_i64)? as i32;
      let doc_type = row.get(2).and_then(Data::as_i64)? as i32;
      Some((gimla_code, doc_type))
    })
    .collect()
}
