use crossterm::event::{KeyEvent, KeyEventKind};

use crate::action::Action;
use crate::config::{Config, normalize_key_event};

/// Translates one key press into the bound action. Unbound keys and key
/// releases map to `Action::None`.
pub fn map_key(key: KeyEvent, config: &Config) -> Action {
  if key.kind == KeyEventKind::Release {
    return Action::None;
  }
  let kb = normalize_key_event(key);
  config.keys.get(&kb).cloned().unwrap_or(Action::None)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

  fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
      code,
      modifiers: KeyModifiers::NONE,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn key_with_mod(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
    KeyEvent {
      code,
      modifiers,
      kind: KeyEventKind::Press,
      state: KeyEventState::NONE,
    }
  }

  fn cfg() -> Config {
    Config::default()
  }

  #[test]
  fn test_quit() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('q')), &c), Action::Quit);
    assert_eq!(map_key(key_with_mod(KeyCode::Char('c'), KeyModifiers::CONTROL), &c), Action::Quit);
  }

  #[test]
  fn test_navigation() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('j')), &c), Action::MoveDown);
    assert_eq!(map_key(key(KeyCode::Char('k')), &c), Action::MoveUp);
    assert_eq!(map_key(key(KeyCode::Down), &c), Action::MoveDown);
    assert_eq!(map_key(key(KeyCode::Up), &c), Action::MoveUp);
    assert_eq!(map_key(key(KeyCode::Home), &c), Action::GoToTop);
    assert_eq!(map_key(key(KeyCode::End), &c), Action::GoToBottom);
    assert_eq!(map_key(key(KeyCode::Backspace), &c), Action::GoParent);
    assert_eq!(map_key(key(KeyCode::Char('b')), &c), Action::GoBack);
    assert_eq!(map_key(key(KeyCode::Char('/')), &c), Action::Find);
  }

  #[test]
  fn test_entry_actions() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Enter), &c), Action::Activate);
    assert_eq!(map_key(key(KeyCode::Char('r')), &c), Action::Rename);
    assert_eq!(map_key(key(KeyCode::Char('d')), &c), Action::Delete);
    assert_eq!(map_key(key(KeyCode::Char('a')), &c), Action::NewFile);
    assert_eq!(map_key(key_with_mod(KeyCode::Char('A'), KeyModifiers::SHIFT), &c), Action::NewDir);
  }

  #[test]
  fn test_unbound_key_is_none() {
    let c = cfg();
    assert_eq!(map_key(key(KeyCode::Char('z')), &c), Action::None);
    assert_eq!(map_key(key(KeyCode::Esc), &c), Action::None);
  }

  #[test]
  fn test_release_is_ignored() {
    let c = cfg();
    let mut release = key(KeyCode::Char('q'));
    release.kind = KeyEventKind::Release;
    assert_eq!(map_key(release, &c), Action::None);
  }

  #[test]
  fn test_custom_config_remaps_key() {
    let mut c = cfg();
    let kb = crate::config::KeyBinding {
      code: KeyCode::Char('j'),
      modifiers: KeyModifiers::NONE,
    };
    c.keys.insert(kb, Action::Quit);
    assert_eq!(map_key(key(KeyCode::Char('j')), &c), Action::Quit);
  }
}
