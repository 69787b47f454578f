//! Report writer: three sheets, each with a named table and autosized
//! columns, plus the in-use/retry discipline around the actual save.

use std::{fs::OpenOptions, path::Path};

use adarep_core::{DocumentType, GimlaToDocument, GimlaType};
use rust_xlsxwriter::{Table, TableColumn, TableStyle, Workbook, Worksheet};
use tracing::{info, warn};

use crate::{
  error::{Error, Result},
  sheet,
};

/// The three exported tables, already sorted by their comparison keys.
#[derive(Debug, Default)]
pub struct ReportTables {
  pub gimla_types: Vec<GimlaType>,
  pub doc_types:   Vec<DocumentType>,
  pub mappings:    Vec<GimlaToDocument>,
}

/// Decides whether a save should be retried after the destination file was
/// found to be in use. The CLI asks the user; tests answer directly.
pub trait ConflictPrompt {
  fn confirm_retry(&self, path: &Path) -> bool;
}

/// Write `tables` to the report at `path`, replacing its contents.
///
/// If the destination is in use — detected before the write and again on a
/// write failure — the prompt is consulted; declining returns
/// [`Error::Aborted`] with nothing written.
pub fn write_report(
  path: &Path,
  tables: &ReportTables,
  prompt: &dyn ConflictPrompt,
) -> Result<()> {
  while is_in_use(path) {
    warn!(path = %path.display(), "destination file is in use");
    if !prompt.confirm_retry(path) {
      return Err(Error::Aborted(path.to_path_buf()));
    }
  }

  let mut workbook = build_workbook(tables)?;
  loop {
    match workbook.save(path) {
      Ok(()) => {
        info!(
          path = %path.display(),
          gimla_types = tables.gimla_types.len(),
          doc_types = tables.doc_types.len(),
          mappings = tables.mappings.len(),
          "report written"
        );
        return Ok(());
      }
      Err(err) => {
        warn!(path = %path.display(), error = %err, "report save failed");
        if !prompt.confirm_retry(path) {
          return Err(Error::Aborted(path.to_path_buf()));
        }
      }
    }
  }
}

/// Probe whether `path` can be opened for exclusive writing. A missing file
/// is not in use.
fn is_in_use(path: &Path) -> bool {
  path.exists()
    && OpenOptions::new()
      .read(true)
      .write(true)
      .open(path)
      .is_err()
}

fn build_workbook(tables: &ReportTables) -> Result<Workbook> {
  let mut workbook = Workbook::new();

  let ws = workbook.add_worksheet().set_name(sheet::GIMLA_TYPES)?;
  let rows: Vec<[CellValue; 2]> = tables
    .gimla_types
    .iter()
    .map(|g| [CellValue::Int(g.code), CellValue::Text(&g.description)])
    .collect();
  write_sheet(ws, "GimlaTypesTable", &["Code", "Description"], &rows)?;

  let ws = workbook.add_worksheet().set_name(sheet::DOC_TYPES)?;
  let rows: Vec<[CellValue; 2]> = tables
    .doc_types
    .iter()
    .map(|d| [CellValue::Int(d.code), CellValue::Text(&d.description)])
    .collect();
  write_sheet(ws, "DocTypesTable", &["Code", "Description"], &rows)?;

  let ws = workbook.add_worksheet().set_name(sheet::GIMLA_TO_DOC)?;
  let rows: Vec<[CellValue; 4]> = tables
    .mappings
    .iter()
    .map(|m| {
      [
        CellValue::Int(m.gimla_code),
        CellValue::Text(&m.gimla_description),
        CellValue::Int(m.doc_type),
        CellValue::Text(&m.doc_description),
      ]
    })
    .collect();
  write_sheet(
    ws,
    "Gimla2DocTable",
    &["Gimla Code", "Gimla Description", "Doc Type", "Doc Description"],
    &rows,
  )?;

  Ok(workbook)
}

enum CellValue<'a> {
  Int(i32),
  Text(&'a str),
}

/// Header row, data rows, a named Medium2-styled table over the written
/// range, then column autosizing.
fn write_sheet<const W: usize>(
  ws: &mut Worksheet,
  table_name: &str,
  headers: &[&str; W],
  rows: &[[CellValue<'_>; W]],
) -> Result<()> {
  for (row_idx, row) in rows.iter().enumerate() {
    for (col_idx, cell) in row.iter().enumerate() {
      let (r, c) = (row_idx as u32 + 1, col_idx as u16);
      match cell {
        CellValue::Int(v) => ws.write(r, c, *v)?,
        CellValue::Text(v) => ws.write(r, c, *v)?,
      };
    }
  }

  let columns: Vec<TableColumn> = headers
    .iter()
    .map(|h| TableColumn::new().set_header(*h))
    .collect();
  let table = Table::new()
    .set_name(table_name)
    .set_style(TableStyle::Medium2)
    .set_columns(&columns);

  // A table needs at least one data row; an empty export keeps a blank one.
  let last_row = (rows.len().max(1)) as u32;
  ws.add_table(0, 0, last_row, (W - 1) as u16, &table)?;
  ws.autofit();
  Ok(())
}
