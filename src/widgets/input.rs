use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::focus::Key;

/// A single editable text line with a caption prefix: the editor's command
/// prompt and the new-note name prompt.
pub struct LineInput {
    caption: String,
    text: String,
    /// Byte offset into `text`; always kept on a char boundary.
    cursor: usize,
}

impl LineInput {
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            text: String::new(),
            cursor: 0,
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: impl Into<String>) {
        self.caption = caption.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Byte offset of the char boundary before the cursor, if any.
    fn prev_boundary(&self) -> Option<usize> {
        self.text[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    /// Default line-editing behavior. Keys without an editing meaning are
    /// ignored, never rejected.
    pub fn handle_key(&mut self, key: Key) {
        match key {
            Key::Char(c) => {
                self.text.insert(self.cursor, c);
                self.cursor += c.len_utf8();
            }
            Key::Backspace => {
                if let Some(at) = self.prev_boundary() {
                    self.text.remove(at);
                    self.cursor = at;
                }
            }
            Key::Delete => {
                if self.cursor < self.text.len() {
                    self.text.remove(self.cursor);
                }
            }
            Key::Left => {
                if let Some(at) = self.prev_boundary() {
                    self.cursor = at;
                }
            }
            Key::Right => {
                if let Some(c) = self.text[self.cursor..].chars().next() {
                    self.cursor += c.len_utf8();
                }
            }
            Key::Home => self.cursor = 0,
            Key::End => self.cursor = self.text.len(),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let line = Line::from(vec![
            Span::raw(self.caption.clone()),
            Span::raw(self.text.clone()),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        if focused {
            let col = self.caption.chars().count() + self.text[..self.cursor].chars().count();
            let x = area.x + (col as u16).min(area.width.saturating_sub(1));
            frame.set_cursor_position((x, area.y));
        }
    }
}
