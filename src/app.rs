use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{info, warn};

use crate::action::Action;
use crate::config::Config;
use crate::error::NavError;
use crate::event::map_key;
use crate::fs::ops;
use crate::fs::{DirectoryListing, EntryKind, ScanOutcome};
use crate::opener::{Launcher, SystemLauncher};
use crate::ui::{self, Display};

/// Outcome of a mutating operation, shown until the user acknowledges it.
#[derive(Debug)]
pub enum Report {
  Renamed,
  Deleted,
  Created(String),
  Failed(NavError),
}

impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Report::Renamed => write!(f, "Renamed successfully"),
      Report::Deleted => write!(f, "Deleted successfully"),
      Report::Created(name) => write!(f, "Created {name}"),
      Report::Failed(e) => write!(f, "{e}"),
    }
  }
}

#[derive(Debug, Clone, Copy)]
enum NewEntry {
  File,
  Dir,
}

pub struct App {
  pub listing: DirectoryListing,
  /// `None` only while the listing is empty.
  pub selected: Option<usize>,
  pub should_quit: bool,
  pub status_message: Option<String>,
  pub last_report: Option<Report>,
  pub viewport_height: usize,
  pub scroll_offset: usize,
  pub hints: String,
  /// Directories left by navigation, most recent last.
  pub history: Vec<PathBuf>,
  max_input_len: usize,
  launcher_program: Option<String>,
  launcher: Box<dyn Launcher>,
}

impl App {
  pub fn new(root: PathBuf, config: &Config) -> Self {
    let mut app = Self {
      listing: DirectoryListing::new(root, config.max_entries, config.dot_entries),
      selected: None,
      should_quit: false,
      status_message: None,
      last_report: None,
      viewport_height: 1,
      scroll_offset: 0,
      hints: config.key_hints(),
      history: Vec::new(),
      max_input_len: config.max_input_len,
      launcher_program: config.launcher_for(std::env::consts::OS).map(str::to_string),
      launcher: Box::new(SystemLauncher::new()),
    };
    app.rescan();
    app
  }

  pub fn with_launcher(mut self, launcher: Box<dyn Launcher>) -> Self {
    self.launcher = launcher;
    self
  }

  /// Render, read a key, dispatch; until `Quit`.
  pub fn run(&mut self, display: &mut dyn Display, config: &Config) -> Result<()> {
    while !self.should_quit {
      self.render(display)?;
      let key = display.read_key()?;
      self.update(map_key(key, config), display)?;
    }
    Ok(())
  }

  pub fn render(&mut self, display: &mut dyn Display) -> Result<()> {
    ui::draw(display, self)
  }

  pub fn update(&mut self, action: Action, display: &mut dyn Display) -> Result<()> {
    if action == Action::None {
      return Ok(());
    }
    self.status_message = None;

    match action {
      Action::Quit => self.should_quit = true,
      Action::MoveUp => {
        if let Some(i) = self.selected
          && i > 0
        {
          self.selected = Some(i - 1);
        }
      }
      Action::MoveDown => {
        if let Some(i) = self.selected
          && i + 1 < self.listing.len()
        {
          self.selected = Some(i + 1);
        }
      }
      Action::GoToTop => {
        if self.selected.is_some() {
          self.selected = Some(0);
        }
      }
      Action::GoToBottom => {
        if self.selected.is_some() {
          self.selected = Some(self.listing.len() - 1);
        }
      }
      Action::Activate => self.activate(),
      Action::GoParent => self.go_parent(),
      Action::GoBack => self.go_back(),
      Action::GoHome => match dirs::home_dir() {
        Some(home) => self.change_dir(home, None),
        None => self.status_message = Some("Cannot determine home directory".to_string()),
      },
      Action::Rename => self.rename(display)?,
      Action::Delete => self.delete(display)?,
      Action::NewFile => self.create(display, NewEntry::File)?,
      Action::NewDir => self.create(display, NewEntry::Dir)?,
      Action::Find => self.find(display)?,
      Action::Refresh => self.rescan(),
      Action::None => {}
    }
    Ok(())
  }

  /// Brings `selected` back inside the listing, or to `None` when it is empty.
  pub fn clamp_selection(&mut self) {
    let len = self.listing.len();
    self.selected = if len == 0 {
      None
    } else {
      Some(self.selected.unwrap_or(0).min(len - 1))
    };
  }

  pub fn adjust_scroll(&mut self) {
    let visible = self.viewport_height.max(1);
    let Some(sel) = self.selected else {
      self.scroll_offset = 0;
      return;
    };
    if sel < self.scroll_offset {
      self.scroll_offset = sel;
    } else if sel >= self.scroll_offset + visible {
      self.scroll_offset = sel + 1 - visible;
    }
  }

  fn activate(&mut self) {
    let Some(path) = self.selected.and_then(|i| self.listing.resolve(i)) else {
      return;
    };
    match ops::entry_kind(&path) {
      Ok(EntryKind::Directory) => self.change_dir(path, None),
      Ok(EntryKind::Other) => self.launch(&path),
      Err(e) => {
        warn!(path = %path.display(), error = %e, "entry type query failed");
        self.rescan();
        self.status_message = Some(e.to_string());
      }
    }
  }

  fn launch(&mut self, path: &Path) {
    let program = self.launcher_program.as_deref();
    if let Err(e) = self.launcher.launch_detached(program, path) {
      warn!(path = %path.display(), error = %e, "viewer launch failed");
      self.status_message = Some(e.to_string());
    }
  }

  fn go_parent(&mut self) {
    let current = self.listing.path().to_path_buf();
    let Some(parent) = current.parent() else {
      return;
    };
    self.change_dir(parent.to_path_buf(), current.file_name());
  }

  fn go_back(&mut self) {
    let Some(previous) = self.history.pop() else {
      self.status_message = Some("No previous directory".to_string());
      return;
    };
    self.enter(previous, None);
  }

  /// Moves to `path`, putting the cursor on `focus` when it is listed there.
  /// The directory left is remembered for `GoBack`.
  fn change_dir(&mut self, path: PathBuf, focus: Option<&OsStr>) {
    let previous = self.listing.path().to_path_buf();
    self.enter(path, focus);
    if self.listing.path() != previous.as_path() {
      self.history.push(previous);
    }
  }

  fn enter(&mut self, path: PathBuf, focus: Option<&OsStr>) {
    let result = self.listing.change_directory(path);
    info!(path = %self.listing.path().display(), "changed directory");
    self.selected = if self.listing.is_empty() {
      None
    } else {
      Some(focus.and_then(|name| self.listing.position(name)).unwrap_or(0))
    };
    self.scroll_offset = 0;
    self.note_scan(result);
  }

  fn rename(&mut self, display: &mut dyn Display) -> Result<()> {
    let Some(from) = self.selected.and_then(|i| self.listing.resolve(i)) else {
      return Ok(());
    };
    self.render(display)?;
    let input = display.read_line("Rename to: ", self.max_input_len)?;
    if input.is_empty() {
      return self.report(display, Report::Failed(NavError::EmptyInputRejected { operation: "Rename" }));
    }

    let to = self.listing.path().join(&input);
    let report = match ops::rename_entry(&from, &to) {
      Ok(()) => {
        info!(from = %from.display(), to = %to.display(), "renamed");
        Report::Renamed
      }
      Err(e) => {
        warn!(error = %e, "rename failed");
        Report::Failed(e)
      }
    };
    self.report(display, report)?;

    let focus = self.local_name(&to);
    self.rescan_focusing(focus.as_deref());
    Ok(())
  }

  fn delete(&mut self, display: &mut dyn Display) -> Result<()> {
    let Some(path) = self.selected.and_then(|i| self.listing.resolve(i)) else {
      return Ok(());
    };
    let report = match ops::delete_entry(&path) {
      Ok(()) => {
        info!(path = %path.display(), "deleted");
        Report::Deleted
      }
      Err(e) => {
        warn!(error = %e, "delete failed");
        Report::Failed(e)
      }
    };
    self.report(display, report)?;
    self.rescan();
    Ok(())
  }

  fn create(&mut self, display: &mut dyn Display, kind: NewEntry) -> Result<()> {
    let (prompt, operation) = match kind {
      NewEntry::File => ("New file: ", "New file"),
      NewEntry::Dir => ("New directory: ", "New directory"),
    };
    self.render(display)?;
    let input = display.read_line(prompt, self.max_input_len)?;
    if input.trim().is_empty() {
      return self.report(display, Report::Failed(NavError::EmptyInputRejected { operation }));
    }

    let path = self.listing.path().join(&input);
    let result = match kind {
      NewEntry::File => ops::create_file(&path),
      NewEntry::Dir => ops::create_dir(&path),
    };
    let report = match result {
      Ok(()) => {
        info!(path = %path.display(), "created");
        Report::Created(input)
      }
      Err(e) => {
        warn!(error = %e, "create failed");
        Report::Failed(e)
      }
    };
    self.report(display, report)?;

    let focus = self.local_name(&path);
    self.rescan_focusing(focus.as_deref());
    Ok(())
  }

  /// Puts the cursor on the first entry whose name contains the query,
  /// ignoring case. The listing itself is left as it is.
  fn find(&mut self, display: &mut dyn Display) -> Result<()> {
    if self.selected.is_none() {
      return Ok(());
    }
    self.render(display)?;
    let query = display.read_line("Find: ", self.max_input_len)?;
    if query.is_empty() {
      return Ok(());
    }
    let needle = query.to_lowercase();
    match self
      .listing
      .names()
      .position(|name| name.to_lowercase().contains(&needle))
    {
      Some(i) => self.selected = Some(i),
      None => self.status_message = Some(format!("No match for {query}")),
    }
    Ok(())
  }

  /// Shows `report` and blocks until any key is pressed.
  fn report(&mut self, display: &mut dyn Display, report: Report) -> Result<()> {
    self.status_message = Some(report.to_string());
    self.render(display)?;
    display.read_key()?;
    self.status_message = None;
    self.last_report = Some(report);
    Ok(())
  }

  fn rescan(&mut self) {
    self.rescan_focusing(None);
  }

  fn rescan_focusing(&mut self, focus: Option<&OsStr>) {
    let result = self.listing.scan();
    self.note_scan(result);
    match focus.and_then(|name| self.listing.position(name)) {
      Some(i) => self.selected = Some(i),
      None => self.clamp_selection(),
    }
  }

  fn note_scan(&mut self, result: Result<ScanOutcome, NavError>) {
    match result {
      Ok(ScanOutcome::Complete) => {}
      Ok(ScanOutcome::Truncated { limit }) => {
        warn!(path = %self.listing.path().display(), limit, "listing truncated");
        self.status_message = Some(format!("Showing first {limit} entries"));
      }
      Err(e) => self.status_message = Some(e.to_string()),
    }
  }

  /// File name of `path` if it lives directly in the current directory.
  fn local_name(&self, path: &Path) -> Option<OsString> {
    if path.parent() == Some(self.listing.path()) {
      path.file_name().map(OsStr::to_os_string)
    } else {
      None
    }
  }
}
