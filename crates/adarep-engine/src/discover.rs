//! Source-file discovery: `index*.xml` under the data path.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

/// Find index files under `root`, sorted for deterministic processing
/// order. Unreadable directory entries are logged and skipped.
pub fn find_index_files(root: &Path, recursive: bool) -> Vec<PathBuf> {
  let mut files: Vec<PathBuf> = if recursive {
    WalkDir::new(root)
      .into_iter()
      .filter_map(|entry| match entry {
        Ok(entry) => Some(entry),
        Err(err) => {
          warn!(error = %err, "skipping unreadable entry");
          None
        }
      })
      .filter(|entry| entry.file_type().is_file())
      .map(|entry| entry.into_path())
      .filter(|path| is_index_file(path))
      .collect()
  } else {
    match std::fs::read_dir(root) {
      Ok(entries) => entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_index_file(path))
        .collect(),
      Err(err) => {
        warn!(root = %root.display(), error = %err, "cannot list data path");
        Vec::new()
      }
    }
  };
  files.sort();
  files
}

/// Matches the original's `index*.xml` pattern, case-insensitively.
fn is_index_file(path: &Path) -> bool {
  let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
    return false;
  };
  let lower = name.to_ascii_lowercase();
  lower.starts_with("index") && lower.ends_with(".xml")
}

// ─── Tests ───────────────────────────────────────────────────────────────────
