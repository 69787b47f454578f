//! `adarep` — Ada XML index to Excel report converter.
//!
//! # Usage
//!
//! ```
//! adarep --data-path /archive/2024 --excel-file /reports/ada.xlsx
//! adarep --data-path /archive --recursive --rename-files
//! ```
//!
//! Settings persist in a JSON config file; command-line flags take
//! precedence and the merged configuration is saved back after a
//! successful run.

mod config;

use std::{
  io::{self, BufRead, Write},
  path::{Path, PathBuf},
};

use adarep_engine::{RunOptions, run};
use adarep_report::ConflictPrompt;
use anyhow::{Context, Result};
use clap::Parser;
use config::ConfigData;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "adarep", about = "Ada XML index to Excel report converter")]
struct Args {
  /// Path to the JSON settings file.
  #[arg(short, long, value_name = "FILE", default_value = "config.json")]
  config: PathBuf,

  /// Root folder containing index*.xml files.
  #[arg(long, value_name = "DIR")]
  data_path: Option<PathBuf>,

  /// Destination Excel report file.
  #[arg(long, value_name = "FILE")]
  excel_file: Option<PathBuf>,

  /// Rename document files to their canonical names after merging.
  #[arg(long)]
  rename_files: bool,

  /// Delete each index file after its records are merged.
  #[arg(long)]
  delete_files: bool,

  /// Scan the data path recursively.
  #[arg(long)]
  recursive: bool,
}

// ─── Retry prompt ─────────────────────────────────────────────────────────────

/// Asks on stderr whether to retry a save against an in-use report file.
struct StdinPrompt;

impl ConflictPrompt for StdinPrompt {
  fn confirm_retry(&self, path: &Path) -> bool {
    eprint!(
      "The file '{}' is currently open. Close it and press Enter to retry, \
       or type 'a' to abort: ",
      path.display()
    );
    io::stderr().flush().ok();
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line).is_err() {
      return false;
    }
    !line.trim().eq_ignore_ascii_case("a")
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  // CLI flags override the persisted settings.
  let mut cfg = ConfigData::load(&args.config)?;
  if let Some(path) = &args.data_path {
    cfg.data_path = path.display().to_string();
  }
  if let Some(path) = &args.excel_file {
    cfg.excel_file = path.display().to_string();
  }
  if args.rename_files {
    cfg.rename_files = true;
  }
  if args.delete_files {
    cfg.delete_files = true;
  }

  if cfg.data_path.trim().is_empty() || cfg.excel_file.trim().is_empty() {
    anyhow::bail!(
      "both a data path and an excel file are required (pass --data-path \
       and --excel-file, or set them in the config file)"
    );
  }

  let options = RunOptions {
    data_path:    PathBuf::from(cfg.data_path.trim()),
    report_path:  PathBuf::from(cfg.excel_file.trim()),
    rename_files: cfg.rename_files,
    delete_files: cfg.delete_files,
    recursive:    args.recursive,
  };

  info!(
    data_path = %options.data_path.display(),
    report = %options.report_path.display(),
    "processing started"
  );

  match run(&options, &StdinPrompt) {
    Ok(summary) => {
      cfg.store(&args.config).context("saving settings")?;
      info!(
        files = summary.files_processed,
        skipped = summary.files_skipped,
        records = summary.records_merged,
        renamed = summary.files_renamed,
        gimla_types = summary.gimla_types,
        doc_types = summary.doc_types,
        mappings = summary.mappings,
        "report updated successfully"
      );
      Ok(())
    }
    Err(err) => {
      error!(error = %err, "operation aborted");
      Err(err.into())
    }
  }
}
