//! XML index-file codec for adarep.
//!
//! Reads the fixed `Ada` record layout produced by the archive system and
//! turns one index file into a deduplicated [`DocumentSet`]. Pure
//! synchronous; the only I/O is reading the index file itself.

pub mod error;
mod parse;

use std::{
  collections::HashSet,
  path::{Path, PathBuf},
};

use adarep_core::AdaDocument;
pub use error::{Error, Result};
pub use parse::parse_documents;

/// All records loaded from one source index file, deduplicated by full
/// record equality and tagged with the file's path for later
/// file-reconciliation lookups.
#[derive(Debug)]
pub struct DocumentSet {
  source_path: PathBuf,
  documents:   HashSet<AdaDocument>,
}

impl DocumentSet {
  /// Load every `Ada` record from `path`.
  ///
  /// A missing file yields an empty set, not an error; a malformed record
  /// fails the whole file.
  pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
    let source_path = path.into();
    let mut documents = HashSet::new();
    if source_path.exists() {
      let raw = std::fs::read_to_string(&source_path)?;
      for doc in parse_documents(&raw)? {
        documents.insert(doc);
      }
    }
    Ok(Self {
      source_path,
      documents,
    })
  }

  /// The index file this set was loaded from.
  pub fn source_path(&self) -> &Path {
    &self.source_path
  }

  /// The folder containing the index file (and the document files it
  /// describes).
  pub fn folder(&self) -> &Path {
    self.source_path.parent().unwrap_or(Path::new(""))
  }

  pub fn len(&self) -> usize {
    self.documents.len()
  }

  pub fn is_empty(&self) -> bool {
    self.documents.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &AdaDocument> {
    self.documents.iter()
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
