//! File reconciler: bring document files in a folder in line with the
//! canonical names derived from their records.
//!
//! Per record the situation is a three-way decision, kept pure in
//! [`decide`]; [`rename_documents`] resolves the folder contents, applies
//! the decisions and counts the renamed/cleaned files.

use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use adarep_xml::DocumentSet;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// What to do for one record, given what is currently on disk.
#[derive(Debug, PartialEq, Eq)]
pub enum RenameOutcome {
  /// A file carrying the canonical name already exists (from a prior run);
  /// the identifier-named leftover, if any, should be removed.
  AlreadyRenamed { leftover: Option<PathBuf> },
  /// No identifier-named file in the folder; reported, not an error.
  NotFound,
  /// Move `from` to `to`, preserving the original extension.
  Rename { from: PathBuf, to: PathBuf },
}

/// Pure decision for one record.
///
/// `original` is the identifier-named file found in the folder (if any),
/// `renamed` a file already carrying the canonical name (any extension).
pub fn decide(
  original: Option<PathBuf>,
  renamed: Option<PathBuf>,
  new_file_name: &str,
  folder: &Path,
) -> RenameOutcome {
  if renamed.is_some() {
    return RenameOutcome::AlreadyRenamed { leftover: original };
  }
  let Some(from) = original else {
    return RenameOutcome::NotFound;
  };
  let target = match from.extension().and_then(OsStr::to_str) {
    Some(ext) => format!("{new_file_name}.{ext}"),
    None => new_file_name.to_string(),
  };
  let to = folder.join(target);
  RenameOutcome::Rename { from, to }
}

/// Rename every document file described by `set` in the set's folder.
///
/// Returns the number of files renamed or cleaned up. Filesystem failures
/// are not swallowed; the first one aborts with an error.
pub fn rename_documents(set: &DocumentSet) -> Result<u32> {
  let folder = set.folder();
  info!(folder = %folder.display(), "start renaming files");

  let mut renamed = 0u32;
  for doc in set.iter() {
    let name = doc.new_file_name();
    let original = find_by_stem(folder, &doc.ada_id.to_string());
    let existing = find_by_stem(folder, &name);

    match decide(original, existing, &name, folder) {
      RenameOutcome::AlreadyRenamed { leftover } => {
        renamed += 1;
        if let Some(path) = leftover {
          info!(path = %path.display(), "deleting leftover original");
          std::fs::remove_file(&path)
            .map_err(|source| Error::Rename { path, source })?;
        }
      }
      RenameOutcome::NotFound => {
        warn!(
          ada_id = doc.ada_id,
          folder = %folder.display(),
          "document file not found"
        );
      }
      RenameOutcome::Rename { from, to } => {
        // Never clobber an existing file at the target path.
        if !to.exists() {
          info!(from = %from.display(), to = %to.display(), "renaming file");
          std::fs::rename(&from, &to)
            .map_err(|source| Error::Rename { path: from, source })?;
          renamed += 1;
        }
      }
    }
  }

  info!(folder = %folder.display(), renamed, "completed renaming files");
  Ok(renamed)
}

/// First file in `folder` named `<stem>` or `<stem>.<anything>`.
fn find_by_stem(folder: &Path, stem: &str) -> Option<PathBuf> {
  let prefix = format!("{stem}.");
  let mut matches: Vec<PathBuf> = std::fs::read_dir(folder)
    .ok()?
    .filter_map(|entry| entry.ok())
    .map(|entry| entry.path())
    .filter(|path| {
      path.is_file()
        && path
          .file_name()
          .and_then(OsStr::to_str)
          .is_some_and(|name| name == stem || name.starts_with(&prefix))
    })
    .collect();
  matches.sort();
  matches.into_iter().next()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
