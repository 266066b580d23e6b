//! Text input widget
//!
//! A single-line text field. The cursor counts characters, not bytes, so
//! Turkish titles like "Kahve çekirdeği" edit correctly.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// A simple text input widget
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Whether the input is focused
    pub focused: bool,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set content and move the cursor to its end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self.cursor = self.char_count();
        self
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    /// Byte offset of the character at `index`
    fn byte_offset(&self, index: usize) -> usize {
        self.content
            .char_indices()
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_count() {
            let at = self.byte_offset(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Split the content around the cursor: text before, the character
    /// under the cursor (a space at the end), and the rest.
    pub fn split_at_cursor(&self) -> (&str, String, &str) {
        let at = self.byte_offset(self.cursor);
        let (before, after) = self.content.split_at(at);
        let mut rest = after.chars();
        let under = rest.next().map(String::from).unwrap_or_else(|| " ".into());
        (before, under, rest.as_str())
    }
}

impl Widget for &TextInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label_style = if self.focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![Span::styled(format!("{:>12}: ", self.label), label_style)];

        if self.focused {
            let (before, under, after) = self.split_at_cursor();
            let value_style = Style::default().fg(Color::White);
            spans.push(Span::styled(before.to_string(), value_style));
            spans.push(Span::styled(
                under,
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
            spans.push(Span::styled(after.to_string(), value_style));
        } else if self.content.is_empty() {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ));
        } else {
            spans.push(Span::styled(
                self.content.clone(),
                Style::default().fg(Color::Yellow),
            ));
        }

        Line::from(spans).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_backspace_multibyte() {
        let mut input = TextInput::new().content("çay");
        assert_eq!(input.cursor, 3);

        input.backspace();
        assert_eq!(input.value(), "ça");

        input.move_start();
        input.insert('Ş');
        assert_eq!(input.value(), "Şça");
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut input = TextInput::new().content("öğle");
        input.move_start();
        input.move_right();
        input.delete();
        assert_eq!(input.value(), "öle");

        input.move_end();
        input.delete();
        assert_eq!(input.value(), "öle");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::new();
        input.move_left();
        input.move_right();
        assert_eq!(input.cursor, 0);
        input.backspace();
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_split_at_cursor() {
        let mut input = TextInput::new().content("kahve");
        assert_eq!(input.split_at_cursor(), ("kahve", " ".to_string(), ""));

        input.move_start();
        input.move_right();
        assert_eq!(input.split_at_cursor(), ("k", "a".to_string(), "hve"));
    }
}
