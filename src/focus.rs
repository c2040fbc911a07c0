//! # Focus routing
//!
//! The composition primitives every panel in the tree speaks: a canonical
//! [`Key`], the explicit [`Keymap`] translation object handed down from the
//! root, and the [`Outcome`] of offering a key to a node.
//!
//! Routing is bubble-up-with-interception: a node first offers the key to
//! its focused child; a consumed key stops there, an unconsumed key may be
//! remapped or reacted to by the parent before it propagates further. Keys
//! nothing claims reach the root, where only `q` and `esc` mean anything.

use std::collections::HashMap;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::Frame;

/// Canonical keystroke delivered to the focus tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Up,
    Down,
    Left,
    Right,
    Enter,
    Esc,
    Tab,
    Backspace,
    Delete,
    Home,
    End,
}

impl Key {
    /// Translate a raw crossterm event. Returns `None` for key releases
    /// and codes the application has no use for.
    pub fn from_event(event: KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        match event.code {
            KeyCode::Char(c) => Some(Key::Char(c)),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Esc),
            KeyCode::Tab => Some(Key::Tab),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            _ => None,
        }
    }
}

/// Input-translation table passed into the root router at construction.
///
/// List-like nodes consult it for their default scroll behavior, so `k`/`j`
/// can act as up/down without a process-wide remap. It is deliberately not
/// applied to literal-key bindings (the editor's Normal-mode motions) or to
/// text entry.
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    overrides: HashMap<Key, Key>,
}

impl Keymap {
    /// No translation at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The stock vi-flavored list navigation: `k` up, `j` down.
    pub fn vi_lists() -> Self {
        Self::empty()
            .remap(Key::Char('k'), Key::Up)
            .remap(Key::Char('j'), Key::Down)
    }

    pub fn remap(mut self, from: Key, to: Key) -> Self {
        self.overrides.insert(from, to);
        self
    }

    /// The canonical meaning of `key` under this table (identity when
    /// unmapped).
    pub fn canonical(&self, key: Key) -> Key {
        self.overrides.get(&key).copied().unwrap_or(key)
    }
}

/// Parameters a view factory receives when the view is (re)constructed.
#[derive(Debug, Clone, Default)]
pub struct ViewParams {
    /// Note title to open immediately (notes view).
    pub open: Option<String>,
}

impl ViewParams {
    pub fn open(title: impl Into<String>) -> Self {
        Self {
            open: Some(title.into()),
        }
    }
}

/// Action a node asks an ancestor to perform. Consuming the key and
/// requesting are one step; an ancestor that does not recognize a request
/// passes it further up, and the root drops what it cannot apply.
#[derive(Debug, Clone)]
pub enum Request {
    /// Replace the body with the named view.
    SwitchView { name: String, params: ViewParams },
    /// Terminate the application.
    Quit,
    /// Move host focus to the navigation footer.
    FocusNav,
    /// Move host focus back to the body.
    FocusBody,
    /// A note transitioned from new to existing; listing views refresh.
    NoteCreated(String),
}

/// Result of offering one key to a node.
#[must_use]
#[derive(Debug, Clone)]
pub enum Outcome {
    /// The key was consumed; routing stops.
    Consumed,
    /// The key was not claimed; the parent decides next.
    Pass(Key),
    /// The key was consumed and an ancestor should act.
    Request(Request),
}

/// Capability interface of every node in the focus tree.
///
/// Concrete nodes are a small closed set of structs composed by
/// construction; each owns its children and a focused-child pointer, and
/// focus changes are local pointer mutations, never broadcasts.
pub trait FocusNode {
    /// Offer one key. Must not panic for any key value; unbound keys are
    /// returned via [`Outcome::Pass`].
    fn keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome;

    /// Paint this node into `area`. `focused` is true when the node lies
    /// on the focused root-to-leaf path.
    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool);
}
