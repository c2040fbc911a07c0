//! The application palette: one place for the handful of styles the frame
//! and the views share.

use ratatui::style::{Color, Modifier, Style};

/// Header and navigation bar: white on dark blue.
pub fn header() -> Style {
    Style::default().fg(Color::White).bg(Color::Blue)
}

/// Section subheaders: yellow on black.
pub fn subheader() -> Style {
    Style::default().fg(Color::Yellow).bg(Color::Black)
}

/// The item under the cursor in a focused list.
pub fn active() -> Style {
    Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
}

/// The remembered selection of an unfocused list.
pub fn selected_idle() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Transient status messages.
pub fn status() -> Style {
    Style::default().fg(Color::Black).bg(Color::Yellow)
}
