use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use super::Display;
use super::prompt::{LineInput, fit_tail};

struct DrawnLine {
  row: u16,
  col: u16,
  text: String,
  highlighted: bool,
}

/// `Display` backed by ratatui over crossterm. Lines are buffered and pushed
/// to the screen as one frame whenever input is awaited.
pub struct TerminalDisplay {
  terminal: Terminal<CrosstermBackend<Stdout>>,
  lines: Vec<DrawnLine>,
}

impl TerminalDisplay {
  pub fn new() -> Result<Self> {
    let backend = CrosstermBackend::new(io::stdout());
    Ok(Self {
      terminal: Terminal::new(backend)?,
      lines: Vec::new(),
    })
  }

  fn flush(&mut self, prompt: Option<&str>) -> Result<()> {
    let lines = &self.lines;
    self.terminal.draw(|frame| {
      let area = frame.area();
      let last_row = area.height.saturating_sub(1);
      for line in lines {
        if line.row >= area.height || line.col >= area.width {
          continue;
        }
        if prompt.is_some() && line.row == last_row {
          continue;
        }
        let style = if line.highlighted {
          Style::default()
            .fg(Color::Indexed(234))
            .bg(Color::Indexed(75))
            .add_modifier(Modifier::BOLD)
        } else {
          Style::default()
        };
        let rect = Rect::new(line.col, line.row, area.width - line.col, 1);
        frame.render_widget(Paragraph::new(Span::styled(line.text.as_str(), style)), rect);
      }
      if let Some(text) = prompt {
        let visible = fit_tail(text, area.width as usize);
        let rect = Rect::new(0, last_row, area.width, 1);
        frame.render_widget(
          Paragraph::new(Span::styled(visible, Style::default().fg(Color::Indexed(252)))),
          rect,
        );
      }
    })?;
    Ok(())
  }
}

impl Display for TerminalDisplay {
  fn clear_screen(&mut self) {
    self.lines.clear();
  }

  fn draw_line(&mut self, row: u16, col: u16, text: &str, highlighted: bool) {
    self.lines.retain(|l| !(l.row == row && l.col == col));
    self.lines.push(DrawnLine {
      row,
      col,
      text: text.to_string(),
      highlighted,
    });
  }

  fn size(&self) -> Result<(u16, u16)> {
    Ok(crossterm::terminal::size()?)
  }

  fn read_key(&mut self) -> Result<KeyEvent> {
    self.flush(None)?;
    loop {
      match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => return Ok(key),
        Event::Resize(_, _) => self.flush(None)?,
        _ => {}
      }
    }
  }

  fn read_line(&mut self, prompt: &str, max_len: usize) -> Result<String> {
    let mut input = LineInput::new(max_len);
    loop {
      self.flush(Some(&format!("{prompt}{}▌", input.value())))?;
      let key = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => key,
        _ => continue,
      };
      match key.code {
        KeyCode::Enter => return Ok(input.into_value()),
        KeyCode::Esc => return Ok(String::new()),
        KeyCode::Backspace => input.backspace(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
          input.insert(c);
        }
        _ => {}
      }
    }
  }
}
