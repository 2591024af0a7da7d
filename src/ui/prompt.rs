use unicode_width::UnicodeWidthChar;

/// Single-line text buffer capped at `max_len` bytes.
#[derive(Debug, Default)]
pub struct LineInput {
  buf: String,
  max_len: usize,
}

impl LineInput {
  pub fn new(max_len: usize) -> Self {
    Self { buf: String::new(), max_len }
  }

  /// Appends `c` unless the result would exceed `max_len` bytes.
  pub fn insert(&mut self, c: char) -> bool {
    if self.buf.len() + c.len_utf8() > self.max_len {
      return false;
    }
    self.buf.push(c);
    true
  }

  pub fn backspace(&mut self) {
    self.buf.pop();
  }

  pub fn value(&self) -> &str {
    &self.buf
  }

  pub fn into_value(self) -> String {
    self.buf
  }
}

/// Longest suffix of `text` that fits in `width` terminal columns.
pub fn fit_tail(text: &str, width: usize) -> &str {
  let mut used = 0;
  for (idx, c) in text.char_indices().rev() {
    used += c.width().unwrap_or(0);
    if used > width {
      return &text[idx + c.len_utf8()..];
    }
  }
  text
}
