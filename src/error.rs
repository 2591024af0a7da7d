//! Recoverable failures of browsing and filesystem operations.
//!
//! None of these end the browser. The `#[error]` text of each variant is what
//! the user sees in the status line.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavError {
  #[error("Cannot read {}: {source}", path.display())]
  ScanFailed { path: PathBuf, source: io::Error },

  #[error("Failed to rename: {source}")]
  RenameFailed {
    from: PathBuf,
    to: PathBuf,
    source: io::Error,
  },

  #[error("Failed to delete: {source}")]
  DeleteFailed { path: PathBuf, source: io::Error },

  #[error("Failed to create {name}: {source}")]
  CreateFailed { name: String, source: io::Error },

  #[error("{operation}: empty name rejected")]
  EmptyInputRejected { operation: &'static str },

  #[error("Failed to launch {program}: {source}")]
  LaunchFailed { program: String, source: io::Error },

  #[error("Cannot open {}: {source}", path.display())]
  Inaccessible { path: PathBuf, source: io::Error },
}
