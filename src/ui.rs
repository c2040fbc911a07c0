use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, HostFocus};
use crate::focus::FocusNode;
use crate::widgets::theme;

impl App {
    /// Paint the persistent frame and the mounted body.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // body
                Constraint::Length(1), // navigation footer
            ])
            .split(f.area());

        self.header.render(f, chunks[0]);
        self.body
            .render(f, chunks[1], self.focus == HostFocus::Body);
        self.nav.render(f, chunks[2], self.focus == HostFocus::Nav);

        // transient error/status line over the bottom of the body
        if let Some(message) = &self.status_message {
            let body = chunks[1];
            if body.height > 0 {
                let line = Rect {
                    y: body.y + body.height - 1,
                    height: 1,
                    ..body
                };
                f.render_widget(
                    Paragraph::new(message.clone()).style(theme::status()),
                    line,
                );
            }
        }
    }
}
