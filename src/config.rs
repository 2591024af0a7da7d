use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
  pub code: KeyCode,
  pub modifiers: KeyModifiers,
}

// Key names accepted in `[keys]`, matched case-insensitively. Also used to
// show a binding in the footer.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
  ("Enter", KeyCode::Enter),
  ("Esc", KeyCode::Esc),
  ("Space", KeyCode::Char(' ')),
  ("Backspace", KeyCode::Backspace),
  ("Delete", KeyCode::Delete),
  ("Tab", KeyCode::Tab),
  ("Up", KeyCode::Up),
  ("Down", KeyCode::Down),
  ("Left", KeyCode::Left),
  ("Right", KeyCode::Right),
  ("Home", KeyCode::Home),
  ("End", KeyCode::End),
];

impl KeyBinding {
  pub fn display_key(&self) -> String {
    let key_name = match self.code {
      KeyCode::F(n) => format!("F{n}"),
      code => match NAMED_KEYS.iter().find(|(_, named)| *named == code) {
        Some((name, _)) => name.to_string(),
        None => match code {
          KeyCode::Char(c) => c.to_string(),
          other => format!("{other:?}"),
        },
      },
    };

    let prefix = if self.modifiers.contains(KeyModifiers::CONTROL) {
      "Ctrl+"
    } else if self.modifiers.contains(KeyModifiers::ALT) {
      "Alt+"
    } else {
      ""
    };
    format!("{prefix}{key_name}")
  }
}

pub struct Config {
  /// Ceiling on the number of entries a single scan keeps.
  pub max_entries: usize,
  /// Longest name, in bytes, accepted by the rename and create prompts.
  pub max_input_len: usize,
  /// List `.` and `..` ahead of the directory's own entries.
  pub dot_entries: bool,
  pub log_level: String,
  /// Viewer executable per `std::env::consts::OS` value.
  pub launchers: HashMap<String, String>,
  pub keys: HashMap<KeyBinding, Action>,
}

#[derive(Deserialize, Default)]
struct TomlConfig {
  general: Option<GeneralConfig>,
  launchers: Option<HashMap<String, String>>,
  keys: Option<HashMap<String, String>>,
}

#[derive(Deserialize, Default)]
struct GeneralConfig {
  max_entries: Option<usize>,
  max_input_len: Option<usize>,
  dot_entries: Option<bool>,
  log_level: Option<String>,
}

/// Parses `key` or `modifier+key`, e.g. `j`, `enter`, `ctrl+c`, `shift+a`, `f5`.
pub fn parse_key_binding(s: &str) -> Option<KeyBinding> {
  let (modifier, key) = match s.split_once('+') {
    Some((modifier, key)) if !key.is_empty() => (Some(modifier.to_lowercase()), key),
    _ => (None, s),
  };
  let code = key_code(key)?;

  let modifiers = match modifier.as_deref() {
    None => KeyModifiers::NONE,
    Some("ctrl") => KeyModifiers::CONTROL,
    Some("alt") => KeyModifiers::ALT,
    // Shifted letters arrive as the uppercase char; see `normalize_key_event`.
    Some("shift") => match code {
      KeyCode::Char(c) => {
        let upper = c.to_uppercase().next().unwrap_or(c);
        return Some(KeyBinding { code: KeyCode::Char(upper), modifiers: KeyModifiers::NONE });
      }
      _ => KeyModifiers::SHIFT,
    },
    Some(_) => return None,
  };
  Some(KeyBinding { code, modifiers })
}

fn key_code(s: &str) -> Option<KeyCode> {
  let mut chars = s.chars();
  if let (Some(c), None) = (chars.next(), chars.next()) {
    return Some(KeyCode::Char(c));
  }
  if let Some(&(_, code)) = NAMED_KEYS.iter().find(|(name, _)| name.eq_ignore_ascii_case(s)) {
    return Some(code);
  }
  let n: u8 = s.strip_prefix(['f', 'F'])?.parse().ok()?;
  (1..=12).contains(&n).then_some(KeyCode::F(n))
}

pub fn normalize_key_event(key: KeyEvent) -> KeyBinding {
  let mut modifiers = key.modifiers;
  if let KeyCode::Char(c) = key.code
    && c.is_uppercase()
  {
    modifiers -= KeyModifiers::SHIFT;
  }
  KeyBinding { code: key.code, modifiers }
}

impl Default for Config {
  fn default() -> Self {
    let mut config = Config::empty();
    let mut errors = Vec::new();
    config.apply_toml_str(Config::default_toml(), &mut errors);
    config
  }
}

impl Config {
  fn empty() -> Self {
    Config {
      max_entries: 1024,
      max_input_len: 255,
      dot_entries: true,
      log_level: "info".to_string(),
      launchers: HashMap::new(),
      keys: HashMap::new(),
    }
  }

  fn apply_toml_str(&mut self, s: &str, errors: &mut Vec<String>) {
    let toml_config: TomlConfig = match toml::from_str(s) {
      Ok(c) => c,
      Err(e) => {
        errors.push(format!("failed to parse config.toml: {e}"));
        return;
      }
    };

    if let Some(general) = toml_config.general {
      match general.max_entries {
        Some(0) => errors.push("max_entries must be at least 1".to_string()),
        Some(n) => self.max_entries = n,
        None => {}
      }
      match general.max_input_len {
        Some(0) => errors.push("max_input_len must be at least 1".to_string()),
        Some(n) => self.max_input_len = n,
        None => {}
      }
      if let Some(dots) = general.dot_entries {
        self.dot_entries = dots;
      }
      if let Some(level) = general.log_level {
        self.log_level = level;
      }
    }

    // Launchers merge over the built-in table; keys replace it.
    if let Some(launchers) = toml_config.launchers {
      self.launchers.extend(launchers);
    }

    if let Some(keys) = toml_config.keys {
      self.keys.clear();
      for (key_str, action_str) in &keys {
        let Some(kb) = parse_key_binding(key_str) else {
          errors.push(format!("invalid key binding: {key_str:?}"));
          continue;
        };
        let Some(action) = Action::from_name(action_str) else {
          errors.push(format!("invalid action: {action_str:?}"));
          continue;
        };
        self.keys.insert(kb, action);
      }
    }
  }

  pub fn default_toml() -> &'static str {
    r#"[general]
max_entries = 1024    # entries kept per directory scan
max_input_len = 255   # longest accepted name, in bytes
dot_entries = true    # list "." and ".." like any other entry
log_level = "info"    # error, warn, info, debug or trace

# Viewer used to open files, keyed by operating system.
[launchers]
linux = "xdg-open"
freebsd = "xdg-open"
openbsd = "xdg-open"
netbsd = "xdg-open"
dragonfly = "xdg-open"
macos = "open"
windows = "explorer"

[keys]
up = "move_up"
k = "move_up"
down = "move_down"
j = "move_down"
home = "go_to_top"
end = "go_to_bottom"
enter = "activate"
left = "go_parent"
h = "go_parent"
backspace = "go_parent"
b = "go_back"
"~" = "go_home"
"/" = "find"
r = "rename"
d = "delete"
a = "new_file"
"shift+a" = "new_dir"
f5 = "refresh"
q = "quit"
"ctrl+c" = "quit"
"#
  }

  /// Viewer executable for `os`. An empty entry means "no table entry".
  pub fn launcher_for(&self, os: &str) -> Option<&str> {
    self.launchers.get(os).map(String::as_str).filter(|p| !p.is_empty())
  }

  pub fn reverse_lookup(&self) -> HashMap<Action, Vec<String>> {
    let mut map: HashMap<Action, Vec<String>> = HashMap::new();
    for (kb, action) in &self.keys {
      map.entry(action.clone()).or_default().push(kb.display_key());
    }
    for keys in map.values_mut() {
      keys.sort();
    }
    map
  }

  /// Footer hint line, e.g. `[Enter] Open | [r] Rename | [d] Delete | [q] Quit`.
  pub fn key_hints(&self) -> String {
    let lookup = self.reverse_lookup();
    let labels = [
      (Action::Activate, "Open"),
      (Action::Rename, "Rename"),
      (Action::Delete, "Delete"),
      (Action::Quit, "Quit"),
    ];
    labels
      .iter()
      .filter_map(|(action, label)| {
        let keys = lookup.get(action)?;
        let key = keys.iter().find(|k| !k.contains('+')).or(keys.first())?;
        Some(format!("[{key}] {label}"))
      })
      .collect::<Vec<_>>()
      .join(" | ")
  }

  pub fn config_path() -> Result<PathBuf, String> {
    dirs::config_dir()
      .map(|d| d.join("navex").join("config.toml"))
      .ok_or_else(|| "could not determine config directory".to_string())
  }

  pub fn dump_default_config(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    std::fs::write(path, Self::default_toml())
      .map_err(|e| format!("failed to write {}: {e}", path.display()))?;

    Ok(())
  }

  pub fn load() -> (Config, Vec<String>) {
    let mut errors = Vec::new();

    let content = Self::config_path()
      .ok()
      .and_then(|p| std::fs::read_to_string(p).ok());

    let config = match content {
      Some(s) => Self::load_from_str_with_errors(&s, &mut errors),
      None => Config::default(),
    };

    (config, errors)
  }

  pub fn load_from_str(s: &str) -> Config {
    let mut errors = Vec::new();
    Self::load_from_str_with_errors(s, &mut errors)
  }

  fn load_from_str_with_errors(s: &str, errors: &mut Vec<String>) -> Config {
    let mut config = Config::default();
    config.apply_toml_str(s, errors);
    config
  }
}
