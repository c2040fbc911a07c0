use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::widgets::theme;

/// The persistent one-line header: `appname: current-view`. The instance
/// survives view switches; only the title text changes.
pub struct Header {
    appname: String,
    title: String,
}

impl Header {
    pub fn new(appname: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            appname: appname.into(),
            title: title.into(),
        }
    }

    pub fn update_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let text = format!("{}: {}", self.appname, self.title);
        frame.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .style(theme::header()),
            area,
        );
    }
}
