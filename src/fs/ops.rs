use std::io;
use std::path::Path;

use crate::error::NavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
  Directory,
  Other,
}

/// Type of `path`, following symlinks.
pub fn entry_kind(path: &Path) -> Result<EntryKind, NavError> {
  match std::fs::metadata(path) {
    Ok(m) if m.is_dir() => Ok(EntryKind::Directory),
    Ok(_) => Ok(EntryKind::Other),
    Err(source) => Err(NavError::Inaccessible {
      path: path.to_path_buf(),
      source,
    }),
  }
}

/// Renames `from` to `to` with a single OS rename call.
pub fn rename_entry(from: &Path, to: &Path) -> Result<(), NavError> {
  std::fs::rename(from, to).map_err(|source| NavError::RenameFailed {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  })
}

/// Removes a file, or a directory only when it is empty.
///
/// Symlinks are removed themselves, never their targets.
pub fn delete_entry(path: &Path) -> Result<(), NavError> {
  let result = match std::fs::symlink_metadata(path) {
    Ok(m) if m.is_dir() => std::fs::remove_dir(path),
    Ok(_) => std::fs::remove_file(path),
    Err(e) => Err(e),
  };
  result.map_err(|source| NavError::DeleteFailed {
    path: path.to_path_buf(),
    source,
  })
}

/// Creates an empty file. Fails if anything already exists at `path`.
pub fn create_file(path: &Path) -> Result<(), NavError> {
  std::fs::OpenOptions::new()
    .write(true)
    .create_new(true)
    .open(path)
    .map(|_| ())
    .map_err(|source| create_failed(path, source))
}

/// Creates a single directory. Fails if anything already exists at `path`.
pub fn create_dir(path: &Path) -> Result<(), NavError> {
  std::fs::create_dir(path).map_err(|source| create_failed(path, source))
}

fn create_failed(path: &Path, source: io::Error) -> NavError {
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_else(|| path.to_string_lossy().to_string());
  NavError::CreateFailed { name, source }
}
