//! Notes view: the title list on the left, and on the right either
//! nothing, the new-note name prompt, or a modal editor. `tab` hops
//! between the panes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::Frame;

use crate::editor::ModalEditor;
use crate::focus::{FocusNode, Key, Keymap, Outcome, Request, ViewParams};
use crate::notes::NoteDb;
use crate::views::ViewContext;
use crate::widgets::{LineInput, SelectList};

/// The right-hand pane is one of a closed set of shapes.
enum RightPane {
    Empty,
    NamePrompt(LineInput),
    Editor(ModalEditor),
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum PaneFocus {
    List,
    Right,
}

pub struct NotesView {
    db: NoteDb,
    list: SelectList,
    right: RightPane,
    focus: PaneFocus,
}

impl NotesView {
    pub fn new(ctx: &ViewContext, params: ViewParams) -> anyhow::Result<Self> {
        let db = NoteDb::new(ctx.store.clone());
        let list = SelectList::new(db.titles()?);
        let mut view = Self {
            db,
            list,
            right: RightPane::Empty,
            focus: PaneFocus::List,
        };
        if let Some(title) = params.open {
            view.open_note(&title)?;
        }
        Ok(view)
    }

    fn open_note(&mut self, title: &str) -> crate::store::Result<()> {
        self.right = RightPane::Editor(ModalEditor::open(&self.db, title)?);
        self.focus = PaneFocus::Right;
        Ok(())
    }

    fn refresh_titles(&mut self) {
        match self.db.titles() {
            Ok(titles) => self.list.set_items(titles),
            Err(e) => tracing::error!(error = %e, "failed to refresh note titles"),
        }
    }

    fn list_keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        match key {
            Key::Enter => {
                if let Some(title) = self.list.selected().map(str::to_string) {
                    if let Err(e) = self.open_note(&title) {
                        tracing::error!(title, error = %e, "failed to open note");
                    }
                }
                Outcome::Consumed
            }
            Key::Char('n') => {
                self.right = RightPane::NamePrompt(LineInput::new("Name: "));
                self.focus = PaneFocus::Right;
                Outcome::Consumed
            }
            key => {
                if self.list.scroll(keymap.canonical(key)) {
                    Outcome::Consumed
                } else {
                    Outcome::Pass(key)
                }
            }
        }
    }

    fn right_keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        match &mut self.right {
            RightPane::Empty => Outcome::Pass(key),
            RightPane::NamePrompt(prompt) => match key {
                Key::Enter => {
                    let title = prompt.text().to_string();
                    if let Err(e) = self.open_note(&title) {
                        tracing::error!(title, error = %e, "failed to open note");
                    }
                    Outcome::Consumed
                }
                Key::Esc | Key::Tab => Outcome::Pass(key),
                key => {
                    prompt.handle_key(key);
                    Outcome::Consumed
                }
            },
            RightPane::Editor(editor) => editor.keypress(key, keymap),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            PaneFocus::List if !matches!(self.right, RightPane::Empty) => PaneFocus::Right,
            PaneFocus::List => PaneFocus::List,
            PaneFocus::Right => PaneFocus::List,
        };
    }
}

impl FocusNode for NotesView {
    fn keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        let outcome = match self.focus {
            PaneFocus::List => self.list_keypress(key, keymap),
            PaneFocus::Right => self.right_keypress(key, keymap),
        };

        match outcome {
            // a new note came into existence; the title list catches up
            Outcome::Request(Request::NoteCreated(_)) => {
                self.refresh_titles();
                Outcome::Consumed
            }
            Outcome::Pass(Key::Tab) => {
                self.toggle_focus();
                Outcome::Consumed
            }
            other => other,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        match &mut self.right {
            RightPane::Empty => {
                self.list
                    .render(frame, area, focused && self.focus == PaneFocus::List);
            }
            right => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                self.list
                    .render(frame, chunks[0], focused && self.focus == PaneFocus::List);
                let right_focused = focused && self.focus == PaneFocus::Right;
                match right {
                    RightPane::NamePrompt(prompt) => {
                        frame.render_widget(ratatui::widgets::Clear, chunks[1]);
                        let line = Rect { height: 1, ..chunks[1] };
                        prompt.render(frame, line, right_focused);
                    }
                    RightPane::Editor(editor) => {
                        editor.render(frame, chunks[1], right_focused);
                    }
                    RightPane::Empty => {}
                }
            }
        }
    }
}
