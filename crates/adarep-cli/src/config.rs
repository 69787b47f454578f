//! Persisted run configuration.
//!
//! A small JSON object with PascalCase keys, kept compatible with the
//! settings files written by earlier versions of the tool:
//! `{"DataPath": …, "ExcelFile": …, "DeleteFiles": …, "RenameFiles": …}`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ConfigData {
  pub data_path:    String,
  pub excel_file:   String,
  pub delete_files: bool,
  pub rename_files: bool,
}

impl ConfigData {
  /// Load settings from `path`; a missing file yields defaults.
  pub fn load(path: &Path) -> Result<Self> {
    if !path.exists() {
      return Ok(Self::default());
    }
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    serde_json::from_str(&raw).context("parsing config file")
  }

  /// Write settings back to `path` as pretty-printed JSON.
  pub fn store(&self, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(self)?;
    std::fs::write(path, json)
      .with_context(|| format!("writing config file {}", path.display()))
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
