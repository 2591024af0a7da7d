use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::NavError;

/// Result of a successful scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
  Complete,
  /// More entries existed than the ceiling allows; only `limit` were kept.
  Truncated { limit: usize },
}

/// The entries of one directory, in the order the OS enumerated them.
///
/// The path is tracked explicitly instead of changing the process working
/// directory; every name resolves against it.
#[derive(Debug)]
pub struct DirectoryListing {
  path: PathBuf,
  entries: Vec<OsString>,
  max_entries: usize,
  dot_entries: bool,
}

impl DirectoryListing {
  /// Creates an empty listing for `path`. Call [`scan`](Self::scan) to fill it.
  pub fn new(path: PathBuf, max_entries: usize, dot_entries: bool) -> Self {
    Self {
      path,
      entries: Vec::new(),
      max_entries,
      dot_entries,
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Re-enumerates `path`, replacing every entry.
  ///
  /// On failure the listing is left empty.
  pub fn scan(&mut self) -> Result<ScanOutcome, NavError> {
    let read_dir = match std::fs::read_dir(&self.path) {
      Ok(rd) => rd,
      Err(source) => {
        self.entries = Vec::new();
        warn!(path = %self.path.display(), error = %source, "scan failed");
        return Err(NavError::ScanFailed {
          path: self.path.clone(),
          source,
        });
      }
    };

    let mut outcome = ScanOutcome::Complete;
    let mut entries = Vec::new();
    if self.dot_entries {
      entries.extend([OsString::from("."), OsString::from("..")]);
      if self.max_entries < entries.len() {
        entries.truncate(self.max_entries);
        outcome = ScanOutcome::Truncated { limit: self.max_entries };
      }
    }

    for entry in read_dir.flatten() {
      if entries.len() >= self.max_entries {
        outcome = ScanOutcome::Truncated { limit: self.max_entries };
        break;
      }
      entries.push(entry.file_name());
    }

    self.entries = entries;
    debug!(path = %self.path.display(), count = self.entries.len(), ?outcome, "scanned");
    Ok(outcome)
  }

  /// Moves to `path` and scans it.
  pub fn change_directory(&mut self, path: PathBuf) -> Result<ScanOutcome, NavError> {
    self.path = std::fs::canonicalize(&path).unwrap_or(path);
    self.scan()
  }

  pub fn entry_at(&self, index: usize) -> Option<&OsStr> {
    self.entries.get(index).map(OsString::as_os_str)
  }

  /// Full path of the entry at `index`.
  pub fn resolve(&self, index: usize) -> Option<PathBuf> {
    self.entry_at(index).map(|name| self.path.join(name))
  }

  pub fn position(&self, name: &OsStr) -> Option<usize> {
    self.entries.iter().position(|e| e == name)
  }

  /// Entry names for display; non-UTF-8 bytes are replaced.
  pub fn names(&self) -> impl Iterator<Item = Cow<'_, str>> {
    self.entries.iter().map(|e| e.to_string_lossy())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::fs;
  use std::sync::atomic::{AtomicU32, Ordering};

  static COUNTER: AtomicU32 = AtomicU32::new(0);

  fn test_dir(prefix: &str) -> PathBuf {
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!("navex_listing_{prefix}_{id}_{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
  }

  fn sorted_names(listing: &DirectoryListing) -> Vec<String> {
    let mut names: Vec<String> = listing.names().map(|n| n.into_owned()).collect();
    names.sort();
    names
  }

  #[test]
  fn test_new_listing_is_empty() {
    let listing = DirectoryListing::new(PathBuf::from("/"), 1024, false);
    assert!(listing.is_empty());
    assert_eq!(listing.entry_at(0), None);
  }

  #[test]
  fn test_scan_lists_everything_including_hidden() {
    let dir = test_dir("all");
    fs::write(dir.join("a.txt"), "a").unwrap();
    fs::write(dir.join(".hidden"), "h").unwrap();
    fs::create_dir(dir.join("sub")).unwrap();

    let mut listing = DirectoryListing::new(dir.clone(), 1024, false);
    assert_eq!(listing.scan().unwrap(), ScanOutcome::Complete);
    assert_eq!(sorted_names(&listing), vec![".hidden", "a.txt", "sub"]);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_dot_entries_come_first() {
    let dir = test_dir("dots");
    fs::write(dir.join("a.txt"), "a").unwrap();

    let mut listing = DirectoryListing::new(dir.clone(), 1024, true);
    listing.scan().unwrap();
    assert_eq!(listing.entry_at(0), Some(OsStr::new(".")));
    assert_eq!(listing.entry_at(1), Some(OsStr::new("..")));
    assert_eq!(listing.entry_at(2), Some(OsStr::new("a.txt")));
    assert_eq!(listing.len(), 3);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_scan_twice_yields_same_order() {
    let dir = test_dir("idempotent");
    for name in ["q", "w", "e", "r", "t", "y"] {
      fs::write(dir.join(name), name).unwrap();
    }

    let mut listing = DirectoryListing::new(dir.clone(), 1024, true);
    listing.scan().unwrap();
    let first: Vec<String> = listing.names().map(|n| n.into_owned()).collect();
    listing.scan().unwrap();
    let second: Vec<String> = listing.names().map(|n| n.into_owned()).collect();
    assert_eq!(first, second);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_scan_reports_truncation() {
    let dir = test_dir("truncate");
    for i in 0..5 {
      fs::write(dir.join(format!("f{i}")), "").unwrap();
    }

    let mut listing = DirectoryListing::new(dir.clone(), 3, false);
    assert_eq!(listing.scan().unwrap(), ScanOutcome::Truncated { limit: 3 });
    assert_eq!(listing.len(), 3);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_exact_ceiling_is_not_truncated() {
    let dir = test_dir("exact");
    for i in 0..3 {
      fs::write(dir.join(format!("f{i}")), "").unwrap();
    }

    let mut listing = DirectoryListing::new(dir.clone(), 3, false);
    assert_eq!(listing.scan().unwrap(), ScanOutcome::Complete);
    assert_eq!(listing.len(), 3);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_ceiling_below_dot_entries_is_truncated() {
    let dir = test_dir("dots_ceiling");

    let mut listing = DirectoryListing::new(dir.clone(), 1, true);
    assert_eq!(listing.scan().unwrap(), ScanOutcome::Truncated { limit: 1 });
    assert_eq!(listing.entry_at(0), Some(OsStr::new(".")));
    assert_eq!(listing.len(), 1);

    let mut listing = DirectoryListing::new(dir.clone(), 2, true);
    assert_eq!(listing.scan().unwrap(), ScanOutcome::Complete);
    assert_eq!(listing.len(), 2);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_scan_failure_empties_listing() {
    let dir = test_dir("vanish");
    fs::write(dir.join("a.txt"), "a").unwrap();

    let mut listing = DirectoryListing::new(dir.clone(), 1024, true);
    listing.scan().unwrap();
    assert!(!listing.is_empty());

    fs::remove_dir_all(&dir).unwrap();
    let err = listing.scan().unwrap_err();
    assert!(matches!(err, NavError::ScanFailed { .. }));
    assert!(listing.is_empty());
  }

  #[test]
  fn test_change_directory_rescans() {
    let dir = test_dir("chdir");
    fs::create_dir(dir.join("sub")).unwrap();
    fs::write(dir.join("sub").join("inner.txt"), "").unwrap();

    let mut listing = DirectoryListing::new(dir.clone(), 1024, false);
    listing.scan().unwrap();
    listing.change_directory(dir.join("sub")).unwrap();
    assert_eq!(listing.path(), fs::canonicalize(dir.join("sub")).unwrap().as_path());
    assert_eq!(sorted_names(&listing), vec!["inner.txt"]);

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_change_directory_through_dot_dot_collapses() {
    let dir = test_dir("dotdot");
    fs::create_dir(dir.join("sub")).unwrap();

    let mut listing = DirectoryListing::new(dir.join("sub"), 1024, true);
    listing.change_directory(dir.join("sub").join("..")).unwrap();
    assert_eq!(listing.path(), fs::canonicalize(&dir).unwrap().as_path());

    let _ = fs::remove_dir_all(&dir);
  }

  #[test]
  fn test_resolve_and_position() {
    let dir = test_dir("resolve");
    fs::write(dir.join("only.txt"), "").unwrap();

    let mut listing = DirectoryListing::new(dir.clone(), 1024, false);
    listing.scan().unwrap();
    assert_eq!(listing.position(OsStr::new("only.txt")), Some(0));
    assert_eq!(listing.resolve(0), Some(dir.join("only.txt")));
    assert_eq!(listing.resolve(1), None);
    assert_eq!(listing.position(OsStr::new("missing")), None);

    let _ = fs::remove_dir_all(&dir);
  }
}
