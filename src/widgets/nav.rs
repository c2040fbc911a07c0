use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::focus::{FocusNode, Key, Keymap, Outcome, Request, ViewParams};
use crate::widgets::theme;

/// The persistent navigation footer: one entry per registered view.
/// `enter` switches to the highlighted view; moving up hands focus back to
/// the body.
pub struct NavMenu {
    items: Vec<String>,
    selected: usize,
}

impl NavMenu {
    pub fn new(items: Vec<String>) -> Self {
        Self { items, selected: 0 }
    }

    pub fn selected(&self) -> Option<&str> {
        self.items.get(self.selected).map(String::as_str)
    }
}

impl FocusNode for NavMenu {
    fn keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        if key == Key::Enter {
            if let Some(name) = self.selected() {
                return Outcome::Request(Request::SwitchView {
                    name: name.to_string(),
                    params: ViewParams::default(),
                });
            }
            return Outcome::Consumed;
        }

        // vi-style horizontal movement inside the menu row
        let key = match key {
            Key::Char('h') => Key::Left,
            Key::Char('l') => Key::Right,
            other => other,
        };

        match keymap.canonical(key) {
            Key::Up => Outcome::Request(Request::FocusBody),
            Key::Left => {
                self.selected = self.selected.saturating_sub(1);
                Outcome::Consumed
            }
            Key::Right => {
                if self.selected + 1 < self.items.len() {
                    self.selected += 1;
                }
                Outcome::Consumed
            }
            _ => Outcome::Pass(key),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let mut spans = Vec::with_capacity(self.items.len() * 2);
        for (i, item) in self.items.iter().enumerate() {
            let style = if i == self.selected && focused {
                theme::header().patch(theme::active())
            } else {
                theme::header()
            };
            spans.push(Span::styled(item.clone(), style));
            spans.push(Span::styled("  ", theme::header()));
        }

        // clock placeholder, right-aligned
        let used: usize = self.items.iter().map(|i| i.len() + 2).sum();
        let clock = "00:00";
        let pad = (area.width as usize)
            .saturating_sub(used)
            .saturating_sub(clock.len());
        spans.push(Span::styled(" ".repeat(pad), theme::header()));
        spans.push(Span::styled(clock, theme::header()));

        frame.render_widget(
            Paragraph::new(Line::from(spans)).style(theme::header()),
            area,
        );
    }
}
