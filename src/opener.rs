use std::path::Path;
use std::process::{Child, Command, Stdio};

use tracing::{debug, info};

use crate::error::NavError;

/// Hands a file to an external viewer without waiting for it.
pub trait Launcher {
  /// Starts `program path`, or the platform's default opener when `program`
  /// is `None`. Returns as soon as the process is spawned.
  fn launch_detached(&mut self, program: Option<&str>, path: &Path) -> Result<(), NavError>;
}

/// Spawns real processes. Finished children are reaped before every launch
/// so none of them linger as zombies.
#[derive(Default)]
pub struct SystemLauncher {
  children: Vec<Child>,
}

impl SystemLauncher {
  pub fn new() -> Self {
    Self::default()
  }

  fn reap(&mut self) {
    let before = self.children.len();
    self.children.retain_mut(|child| matches!(child.try_wait(), Ok(None)));
    let reaped = before - self.children.len();
    if reaped > 0 {
      debug!(reaped, running = self.children.len(), "reaped viewer processes");
    }
  }
}

impl Launcher for SystemLauncher {
  fn launch_detached(&mut self, program: Option<&str>, path: &Path) -> Result<(), NavError> {
    self.reap();

    let Some(program) = program else {
      return open::that_detached(path).map_err(|source| NavError::LaunchFailed {
        program: "default opener".to_string(),
        source,
      });
    };

    let mut cmd = Command::new(program);
    cmd
      .arg(path)
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null());

    // Own process group, so terminal signals aimed at us skip the viewer.
    #[cfg(unix)]
    {
      use std::os::unix::process::CommandExt;
      cmd.process_group(0);
    }

    let child = cmd.spawn().map_err(|source| NavError::LaunchFailed {
      program: program.to_string(),
      source,
    })?;
    info!(program, path = %path.display(), pid = child.id(), "launched viewer");
    self.children.push(child);
    Ok(())
  }
}
