//! Single-line text entry used by the search and goto-line prompts.
//!
//! Editing uses the common readline keys. The box also carries a change
//! callback that runs synchronously on every edit and receives the owning
//! [`Pager`], which is how the search prompt scrolls while the user types.

use super::pager::Pager;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// Callback invoked with the new text after every edit.
pub type OnTextChanged = Box<dyn FnMut(&mut Pager, &str)>;

/// Which characters the box accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFilter {
    /// Any printable character.
    #[default]
    Any,
    /// ASCII digits only.
    Digits,
}

impl InputFilter {
    fn accepts(self, ch: char) -> bool {
        match self {
            Self::Any => !ch.is_control(),
            Self::Digits => ch.is_ascii_digit(),
        }
    }
}

/// Editable text with a character cursor.
#[derive(Default)]
pub struct InputBox {
    text: String,
    /// Cursor position in chars, `0..=text.chars().count()`.
    cursor: usize,
    filter: InputFilter,
    on_text_changed: Option<OnTextChanged>,
}

impl fmt::Debug for InputBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputBox")
            .field("text", &self.text)
            .field("cursor", &self.cursor)
            .field("filter", &self.filter)
            .field("on_text_changed", &self.on_text_changed.is_some())
            .finish()
    }
}

impl InputBox {
    /// Create an empty box accepting the given characters.
    pub fn new(filter: InputFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    /// Register the change callback.
    pub fn with_on_text_changed(
        mut self,
        callback: impl FnMut(&mut Pager, &str) + 'static,
    ) -> Self {
        self.on_text_changed = Some(Box::new(callback));
        self
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text, move the cursor to the end and notify.
    ///
    /// Characters rejected by the filter are dropped.
    pub fn set_text(&mut self, text: &str, pager: &mut Pager) {
        self.text = text.chars().filter(|&ch| self.filter.accepts(ch)).collect();
        self.move_cursor_end();
        self.notify(pager);
    }

    /// Apply an editing key.
    ///
    /// Returns true if the key was an editing key, whether or not it changed
    /// the text. Enter and Esc are never consumed here; the owning mode
    /// decides what they mean.
    pub fn handle_key(&mut self, key: KeyEvent, pager: &mut Pager) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.move_cursor_end(),
            KeyCode::Char('u') if ctrl => {
                if !self.text.is_empty() {
                    self.text.clear();
                    self.cursor = 0;
                    self.notify(pager);
                }
            }
            KeyCode::Char(ch) if !ctrl => {
                if self.filter.accepts(ch) {
                    let at = self.byte_offset(self.cursor);
                    self.text.insert(at, ch);
                    self.cursor += 1;
                    self.notify(pager);
                }
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_offset(self.cursor);
                    self.text.remove(at);
                    self.notify(pager);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let at = self.byte_offset(self.cursor);
                    self.text.remove(at);
                    self.notify(pager);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.move_cursor_end(),
            _ => return false,
        }
        true
    }

    fn notify(&mut self, pager: &mut Pager) {
        if let Some(callback) = self.on_text_changed.as_mut() {
            callback(pager, &self.text);
        }
    }

    fn move_cursor_end(&mut self) {
        self.cursor = self.char_count();
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_index)
            .map_or(self.text.len(), |(offset, _)| offset)
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "input_box_tests.rs"]
mod tests;
