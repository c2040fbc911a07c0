//! # Modal Editor
//!
//! The Normal/Insert/Command state machine bound to one [`Note`]. The
//! transition table is a pure function from `(mode, key)` to the next mode
//! plus a list of effects; the editor applies the effects, which keeps the
//! state machine testable without a terminal.
//!
//! Mode is the only thing that changes how a key is interpreted:
//!
//! - Normal: `i` enters Insert, `:` enters Command, `h j k l g ^ $` move
//!   the cursor, everything else bubbles up unconsumed.
//! - Insert: `esc` returns to Normal, everything else edits the buffer.
//! - Command: `enter` dispatches the prompt as `verb arg...` and returns
//!   to Normal, `esc` abandons the prompt, everything else edits it.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::buffer::TextBuffer;
use crate::focus::{FocusNode, Key, Keymap, Outcome, Request};
use crate::notes::{Note, NoteDb, SaveOutcome};
use crate::widgets::{theme, LineInput};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
    Command,
}

/// Cursor motion available in Normal mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// `g`: jump to the first line, keeping the column.
    FirstLine,
    /// `^` and `$` both land here. TODO: real end-of-line motion for `$`.
    LineStart,
}

/// Side effect of a transition, applied by the editor in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SetCaption(&'static str),
    FocusBuffer,
    FocusPrompt,
    ClearPrompt,
    /// Parse the prompt text and run the command table.
    Dispatch,
    Move(Motion),
    /// Forward to the buffer's default editing behavior.
    EditBuffer(Key),
    /// Forward to the prompt's default line editing.
    EditPrompt(Key),
}

/// The transition table. `None` means the key is not claimed in this mode
/// and bubbles up. Caption and focus effects are emitted only when the
/// mode actually changes, so re-entering the current mode never rewrites
/// the caption.
pub fn transition(mode: Mode, key: Key) -> Option<(Mode, Vec<Effect>)> {
    use Effect::*;
    match (mode, key) {
        (Mode::Normal, Key::Char('i')) => {
            Some((Mode::Insert, vec![SetCaption("(ins)"), FocusBuffer]))
        }
        (Mode::Normal, Key::Char(':')) => {
            Some((Mode::Command, vec![SetCaption(":"), FocusPrompt]))
        }
        (Mode::Normal, Key::Char(c)) => motion_for(c).map(|m| (Mode::Normal, vec![Move(m)])),
        (Mode::Normal, _) => None,

        (Mode::Insert, Key::Esc) => Some((Mode::Normal, vec![SetCaption(""), FocusBuffer])),
        (Mode::Insert, key) => Some((Mode::Insert, vec![EditBuffer(key)])),

        (Mode::Command, Key::Enter) => Some((
            Mode::Normal,
            vec![Dispatch, ClearPrompt, SetCaption(""), FocusBuffer],
        )),
        (Mode::Command, Key::Esc) => Some((
            Mode::Normal,
            vec![ClearPrompt, SetCaption(""), FocusBuffer],
        )),
        (Mode::Command, key) => Some((Mode::Command, vec![EditPrompt(key)])),
    }
}

fn motion_for(c: char) -> Option<Motion> {
    match c {
        'h' => Some(Motion::Left),
        'l' => Some(Motion::Right),
        'k' => Some(Motion::Up),
        'j' => Some(Motion::Down),
        'g' => Some(Motion::FirstLine),
        '^' | '$' => Some(Motion::LineStart),
        _ => None,
    }
}

/// Which editable region holds the editor's inner focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    Buffer,
    Prompt,
}

/// A vi-flavored editor over one note's text.
pub struct ModalEditor {
    note: Note,
    pub buffer: TextBuffer,
    prompt: LineInput,
    mode: Mode,
    region: Region,
}

impl ModalEditor {
    /// Open the note `title` through `db` and load its content into the
    /// buffer (empty for a new note).
    pub fn open(db: &NoteDb, title: &str) -> crate::store::Result<Self> {
        let mut note = db.note(title)?;
        let text = note.content()?.unwrap_or("").to_string();
        Ok(Self {
            note,
            buffer: TextBuffer::from_text(&text),
            prompt: LineInput::new(""),
            mode: Mode::Normal,
            region: Region::Buffer,
        })
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn title(&self) -> &str {
        self.note.title()
    }

    pub fn prompt_text(&self) -> &str {
        self.prompt.text()
    }

    pub fn prompt_caption(&self) -> &str {
        self.prompt.caption()
    }

    fn apply(&mut self, next: Mode, effects: Vec<Effect>) -> Outcome {
        let mut request = None;
        for effect in effects {
            match effect {
                Effect::SetCaption(caption) => self.prompt.set_caption(caption),
                Effect::FocusBuffer => self.region = Region::Buffer,
                Effect::FocusPrompt => self.region = Region::Prompt,
                Effect::ClearPrompt => self.prompt.clear_text(),
                Effect::Dispatch => request = self.dispatch(),
                Effect::Move(motion) => self.apply_motion(motion),
                Effect::EditBuffer(key) => self.edit_buffer(key),
                Effect::EditPrompt(key) => self.prompt.handle_key(key),
            }
        }
        self.mode = next;
        match request {
            Some(req) => Outcome::Request(req),
            None => Outcome::Consumed,
        }
    }

    /// Targets may be out of range; the buffer clamps, not the editor.
    fn apply_motion(&mut self, motion: Motion) {
        let (line, col) = self.buffer.cursor;
        match motion {
            Motion::Left => self.buffer.move_to(line, col.saturating_sub(1)),
            Motion::Right => self.buffer.move_to(line, col + 1),
            Motion::Up => self.buffer.move_to(line.saturating_sub(1), col),
            Motion::Down => self.buffer.move_to(line + 1, col),
            Motion::FirstLine => self.buffer.move_to(0, col),
            Motion::LineStart => self.buffer.move_to(line, 0),
        }
    }

    fn edit_buffer(&mut self, key: Key) {
        match key {
            Key::Char(c) => self.buffer.insert_char(c),
            Key::Enter => self.buffer.insert_newline(),
            Key::Backspace => self.buffer.backspace(),
            Key::Delete => self.buffer.delete(),
            Key::Up => self.buffer.move_up(),
            Key::Down => self.buffer.move_down(),
            Key::Left => self.buffer.move_left(),
            Key::Right => self.buffer.move_right(),
            Key::Home => {
                let (line, _) = self.buffer.cursor;
                self.buffer.move_to(line, 0);
            }
            Key::End => {
                let (line, _) = self.buffer.cursor;
                let end = self.buffer.line_len(line);
                self.buffer.move_to(line, end);
            }
            Key::Esc | Key::Tab => {}
        }
    }

    /// Parse the prompt as `verb arg...` and run the command table.
    /// Unknown verbs and surplus or missing arguments are silently
    /// ignored.
    fn dispatch(&mut self) -> Option<Request> {
        let text = self.prompt.text().to_string();
        let mut words = text.split_whitespace();
        let verb = words.next()?;
        let args: Vec<&str> = words.collect();
        match verb {
            "w" => self.cmd_write(&args),
            "set" => None, // accepted, reserved for future options
            _ => None,
        }
    }

    fn cmd_write(&mut self, _args: &[&str]) -> Option<Request> {
        let text = self.buffer.text();
        match self.note.save(Some(&text)) {
            Ok(SaveOutcome::Created) => {
                self.buffer.modified = false;
                Some(Request::NoteCreated(self.note.title().to_string()))
            }
            Ok(SaveOutcome::Updated) => {
                self.buffer.modified = false;
                None
            }
            Err(e) => {
                tracing::error!(title = %self.note.title(), error = %e, "note save failed");
                None
            }
        }
    }
}

impl FocusNode for ModalEditor {
    fn keypress(&mut self, key: Key, _keymap: &Keymap) -> Outcome {
        match transition(self.mode, key) {
            Some((next, effects)) => self.apply(next, effects),
            None => Outcome::Pass(key),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // note title
                Constraint::Min(1),    // buffer
                Constraint::Length(1), // prompt
            ])
            .split(area);

        frame.render_widget(
            Paragraph::new(self.note.title().to_string()).style(theme::header()),
            chunks[0],
        );

        let body = chunks[1];
        let height = body.height as usize;
        let (cursor_line, cursor_col) = self.buffer.cursor;
        let top = cursor_line.saturating_sub(height.saturating_sub(1));
        let visible: Vec<Line> = self
            .buffer
            .lines
            .iter()
            .skip(top)
            .take(height)
            .map(|l| Line::from(l.as_str()))
            .collect();
        frame.render_widget(Paragraph::new(visible), body);

        if focused && self.region == Region::Buffer {
            let x = body.x + (cursor_col as u16).min(body.width.saturating_sub(1));
            let y = body.y + ((cursor_line - top) as u16).min(body.height.saturating_sub(1));
            frame.set_cursor_position((x, y));
        }

        self.prompt.render(
            frame,
            chunks[2],
            focused && self.region == Region::Prompt,
        );
    }
}
