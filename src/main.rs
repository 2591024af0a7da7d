mod action;
mod app;
mod config;
mod error;
mod event;
mod fs;
mod opener;
mod ui;

use std::io;
use std::panic;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use crossterm::execute;
use crossterm::terminal::{
  EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::Config;
use crate::ui::terminal::TerminalDisplay;

fn main() -> Result<()> {
  let args: Vec<String> = std::env::args().skip(1).collect();

  let mut show_help = false;
  let mut show_version = false;
  let mut show_init = false;

  for arg in &args {
    match arg.as_str() {
      "--help" | "-h" => show_help = true,
      "--version" | "-V" => show_version = true,
      "--init" => show_init = true,
      _ => {
        eprintln!("navex: unknown option '{arg}'");
        std::process::exit(1);
      }
    }
  }

  if show_help {
    println!(concat!(
      "navex - minimal terminal directory browser\n",
      "\n",
      "Usage: navex [options]\n",
      "\n",
      "Options:\n",
      "  --init                   Write the default config file to ~/.config/navex/\n",
      "  -h, --help               Print this help message\n",
      "  -V, --version            Print version\n",
      "\n",
      "Browsing always starts in the current directory.",
    ));
    return Ok(());
  }

  if show_version {
    println!("navex {}", env!("CARGO_PKG_VERSION"));
    return Ok(());
  }

  if show_init {
    let config_path = match Config::config_path() {
      Ok(p) => p,
      Err(e) => {
        eprintln!("navex: {e}");
        std::process::exit(1);
      }
    };

    if config_path.exists() {
      eprint!("{} already exists. Overwrite? [y/N] ", config_path.display());
      let mut answer = String::new();
      io::stdin().read_line(&mut answer).unwrap_or(0);
      if !answer.trim().eq_ignore_ascii_case("y") {
        return Ok(());
      }
    }

    match Config::dump_default_config(&config_path) {
      Ok(()) => println!("{}", config_path.display()),
      Err(e) => {
        eprintln!("navex: {e}");
        std::process::exit(1);
      }
    }
    return Ok(());
  }

  let (config, mut config_errors) = Config::load();
  match init_logging(&config.log_level) {
    Ok(path) => info!(version = env!("CARGO_PKG_VERSION"), log = %path.display(), "starting"),
    Err(e) => config_errors.push(format!("logging disabled: {e}")),
  }
  for e in &config_errors {
    warn!(error = %e, "config problem");
  }

  // Install panic hook that restores terminal
  let original_hook = panic::take_hook();
  panic::set_hook(Box::new(move |info| {
    let _ = restore_terminal();
    original_hook(info);
  }));

  let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
  let root = std::fs::canonicalize(&cwd).unwrap_or(cwd);

  setup_terminal()?;
  let result = run(root, &config, config_errors);
  restore_terminal()?;
  if let Err(ref e) = result {
    warn!(error = %e, "terminal failure");
  }
  info!("exiting");
  result
}

fn run(root: PathBuf, config: &Config, config_errors: Vec<String>) -> Result<()> {
  let mut display = TerminalDisplay::new()?;
  let mut app = App::new(root, config);
  if !config_errors.is_empty() {
    app.status_message = Some(config_errors.join("; "));
  }
  app.run(&mut display, config)
}

fn setup_terminal() -> Result<()> {
  enable_raw_mode()?;
  execute!(io::stdout(), EnterAlternateScreen)?;
  Ok(())
}

fn restore_terminal() -> Result<()> {
  disable_raw_mode()?;
  execute!(io::stdout(), LeaveAlternateScreen)?;
  Ok(())
}

/// Sends `tracing` output to `<state dir>/navex/navex.log`; the terminal
/// belongs to the UI.
fn init_logging(level: &str) -> Result<PathBuf, String> {
  let dir = dirs::state_dir()
    .or_else(dirs::data_local_dir)
    .map(|d| d.join("navex"))
    .ok_or_else(|| "could not determine log directory".to_string())?;
  std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create {}: {e}", dir.display()))?;

  let path = dir.join("navex.log");
  let file = std::fs::OpenOptions::new()
    .create(true)
    .append(true)
    .open(&path)
    .map_err(|e| format!("failed to open {}: {e}", path.display()))?;

  let filter = EnvFilter::try_new(level).map_err(|e| format!("invalid log_level {level:?}: {e}"))?;
  tracing_subscriber::registry()
    .with(filter)
    .with(
      tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false),
    )
    .try_init()
    .map_err(|e| e.to_string())?;

  Ok(path)
}
