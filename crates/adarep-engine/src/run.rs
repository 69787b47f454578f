//! Run orchestration: prior state → merge loop → reconcile → report.

use std::path::PathBuf;

use adarep_core::{Catalog, DocumentType, GimlaType};
use adarep_report::{ConflictPrompt, ReportTables};
use adarep_xml::DocumentSet;
use tracing::{error, info, warn};

use crate::{
  discover,
  error::{Error, Result},
  reconcile,
};

/// Caller-supplied processing options for one run.
#[derive(Debug, Clone)]
pub struct RunOptions {
  /// Root folder to scan for `index*.xml` files.
  pub data_path:    PathBuf,
  /// Destination report file (`.xlsx`).
  pub report_path:  PathBuf,
  /// Rename document files to their canonical names after merging.
  pub rename_files: bool,
  /// Delete each index file once its records are merged.
  pub delete_files: bool,
  /// Descend into subdirectories of the data path.
  pub recursive:    bool,
}

/// Counters reported back to the caller for the final status line.
#[derive(Debug, Default)]
pub struct RunSummary {
  pub files_processed: usize,
  pub files_skipped:   usize,
  pub records_merged:  usize,
  pub files_renamed:   u32,
  pub gimla_types:     usize,
  pub doc_types:       usize,
  pub mappings:        usize,
}

/// Execute one full run.
///
/// Prior report state is folded into a fresh catalog, every discovered
/// index file is merged in turn, and the three exported tables replace the
/// report. A file that fails to parse is logged and skipped without rolling
/// back records already merged; rename and delete failures abort the run.
pub fn run(
  options: &RunOptions,
  prompt: &dyn ConflictPrompt,
) -> Result<RunSummary> {
  if !options.data_path.is_dir() {
    return Err(Error::InvalidDataPath(options.data_path.clone()));
  }

  let mut catalog = Catalog::new();
  load_prior_state(&mut catalog, &options.report_path)?;

  let files =
    discover::find_index_files(&options.data_path, options.recursive);
  info!(count = files.len(), "processing index files");

  let mut summary = RunSummary::default();
  for file in files {
    info!(file = %file.display(), "processing file");
    let set = match DocumentSet::load(&file) {
      Ok(set) => set,
      Err(err) => {
        error!(file = %file.display(), error = %err, "skipping file");
        summary.files_skipped += 1;
        continue;
      }
    };

    for doc in set.iter() {
      catalog.merge_document(doc);
    }
    summary.records_merged += set.len();

    if options.rename_files {
      summary.files_renamed += reconcile::rename_documents(&set)?;
    }
    if options.delete_files {
      info!(file = %file.display(), "deleting index file");
      std::fs::remove_file(&file)
        .map_err(|source| Error::Delete { path: file.clone(), source })?;
    }
    summary.files_processed += 1;
  }
  info!("finished processing files");

  let tables = ReportTables {
    gimla_types: catalog.export_gimla_types(),
    doc_types:   catalog.export_doc_types(),
    mappings:    catalog.export_mappings(),
  };
  summary.gimla_types = tables.gimla_types.len();
  summary.doc_types = tables.doc_types.len();
  summary.mappings = tables.mappings.len();

  adarep_report::write_report(&options.report_path, &tables, prompt)?;
  Ok(summary)
}

/// Seed the catalog from an existing report. Mapping rows that reference an
/// unknown code on either side are dropped.
fn load_prior_state(
  catalog: &mut Catalog,
  report_path: &std::path::Path,
) -> Result<()> {
  let prior = adarep_report::read_prior_state(report_path)?;
  for (code, description) in prior.gimla_rows {
    catalog.insert_gimla_type(GimlaType { code, description });
  }
  for (code, description) in prior.doc_rows {
    catalog.insert_doc_type(DocumentType { code, description });
  }
  for (gimla_code, doc_type) in prior.mapping_rows {
    if !catalog.link_prior_mapping(gimla_code, doc_type) {
      warn!(gimla_code, doc_type, "dropping prior mapping with unknown code");
    }
  }
  Ok(())
}
