#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
  Quit,
  MoveUp,
  MoveDown,
  GoToTop,
  GoToBottom,
  Activate,
  GoParent,
  GoBack,
  GoHome,
  Rename,
  Delete,
  NewFile,
  NewDir,
  Find,
  Refresh,
  None,
}

impl Action {
  pub fn from_name(name: &str) -> Option<Action> {
    match name {
      "quit" => Some(Action::Quit),
      "move_up" => Some(Action::MoveUp),
      "move_down" => Some(Action::MoveDown),
      "go_to_top" => Some(Action::GoToTop),
      "go_to_bottom" => Some(Action::GoToBottom),
      "activate" => Some(Action::Activate),
      "go_parent" => Some(Action::GoParent),
      "go_back" => Some(Action::GoBack),
      "go_home" => Some(Action::GoHome),
      "rename" => Some(Action::Rename),
      "delete" => Some(Action::Delete),
      "new_file" => Some(Action::NewFile),
      "new_dir" => Some(Action::NewDir),
      "find" => Some(Action::Find),
      "refresh" => Some(Action::Refresh),
      "none" => Some(Action::None),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_name_bindable_actions() {
    assert_eq!(Action::from_name("quit"), Some(Action::Quit));
    assert_eq!(Action::from_name("move_up"), Some(Action::MoveUp));
    assert_eq!(Action::from_name("move_down"), Some(Action::MoveDown));
    assert_eq!(Action::from_name("go_to_top"), Some(Action::GoToTop));
    assert_eq!(Action::from_name("go_to_bottom"), Some(Action::GoToBottom));
    assert_eq!(Action::from_name("activate"), Some(Action::Activate));
    assert_eq!(Action::from_name("go_parent"), Some(Action::GoParent));
    assert_eq!(Action::from_name("go_back"), Some(Action::GoBack));
    assert_eq!(Action::from_name("go_home"), Some(Action::GoHome));
    assert_eq!(Action::from_name("rename"), Some(Action::Rename));
    assert_eq!(Action::from_name("delete"), Some(Action::Delete));
    assert_eq!(Action::from_name("new_file"), Some(Action::NewFile));
    assert_eq!(Action::from_name("new_dir"), Some(Action::NewDir));
    assert_eq!(Action::from_name("find"), Some(Action::Find));
    assert_eq!(Action::from_name("refresh"), Some(Action::Refresh));
  }

  #[test]
  fn test_from_name_none() {
    assert_eq!(Action::from_name("none"), Some(Action::None));
  }

  #[test]
  fn test_from_name_invalid() {
    assert_eq!(Action::from_name("garbage"), None);
    assert_eq!(Action::from_name(""), None);
    assert_eq!(Action::from_name("Quit"), None);
  }
}
