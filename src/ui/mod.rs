pub mod prompt;
pub mod terminal;

use anyhow::Result;
use crossterm::event::KeyEvent;

use crate::app::App;

/// Everything the controller needs from a screen and keyboard.
pub trait Display {
  fn clear_screen(&mut self);
  /// Places `text` at `row`/`col`. Text past the right edge is clipped.
  fn draw_line(&mut self, row: u16, col: u16, text: &str, highlighted: bool);
  /// `(cols, rows)`.
  fn size(&self) -> Result<(u16, u16)>;
  /// Blocks for the next key press. Pending drawing is flushed first.
  fn read_key(&mut self) -> Result<KeyEvent>;
  /// Reads one line on the bottom row. `Esc` yields an empty string.
  fn read_line(&mut self, prompt: &str, max_len: usize) -> Result<String>;
}

// Header, hints and status rows.
const CHROME_ROWS: u16 = 3;

pub fn viewport_height(rows: u16) -> usize {
  rows.saturating_sub(CHROME_ROWS).max(1) as usize
}

pub fn draw(display: &mut dyn Display, app: &mut App) -> Result<()> {
  let (_, rows) = display.size()?;
  app.viewport_height = viewport_height(rows);
  app.adjust_scroll();

  display.clear_screen();
  let header = format!("Current Dir: {}", app.listing.path().display());
  display.draw_line(0, 0, &header, false);

  if app.listing.is_empty() {
    display.draw_line(1, 2, "(empty)", false);
  }
  for (i, name) in app
    .listing
    .names()
    .enumerate()
    .skip(app.scroll_offset)
    .take(app.viewport_height)
  {
    let row = (1 + i - app.scroll_offset) as u16;
    display.draw_line(row, 2, &name, app.selected == Some(i));
  }

  // Below this the hint row would land on the header or the entries.
  if rows > CHROME_ROWS {
    display.draw_line(rows - 2, 0, &app.hints, false);
  }
  if let Some(ref msg) = app.status_message {
    display.draw_line(rows.saturating_sub(1), 0, msg, false);
  }
  Ok(())
}
