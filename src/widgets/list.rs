use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::focus::Key;
use crate::widgets::theme;

/// A vertical list with one remembered selection and viewport scrolling.
/// The building block behind the note list, the track and event lists and
/// the log view.
pub struct SelectList {
    items: Vec<String>,
    selected: usize,
    offset: usize,
}

impl SelectList {
    pub fn new(items: Vec<String>) -> Self {
        Self {
            items,
            selected: 0,
            offset: 0,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the items, keeping the selection in range.
    pub fn set_items(&mut self, items: Vec<String>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.offset = self.offset.min(self.selected);
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }

    pub fn at_top(&self) -> bool {
        self.selected == 0
    }

    pub fn select_last(&mut self) {
        self.selected = self.items.len().saturating_sub(1);
    }

    /// Default scroll behavior for a canonical (already keymap-translated)
    /// key. Returns false for keys that are not scrolling.
    pub fn scroll(&mut self, key: Key) -> bool {
        match key {
            Key::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            Key::Down => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                true
            }
            Key::Home => {
                self.selected = 0;
                true
            }
            Key::End => {
                self.select_last();
                true
            }
            _ => false,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let height = area.height as usize;
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if height > 0 && self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }

        let lines: Vec<Line> = self
            .items
            .iter()
            .enumerate()
            .skip(self.offset)
            .take(height)
            .map(|(i, item)| {
                let line = Line::from(item.as_str());
                if i == self.selected {
                    if focused {
                        line.style(theme::active())
                    } else {
                        line.style(theme::selected_idle())
                    }
                } else {
                    line
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}
