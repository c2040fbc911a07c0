//! Library surface of the deck terminal organizer.

pub mod app;
pub mod buffer;
pub mod config;
pub mod editor;
pub mod focus;
pub mod notes;
pub mod store;
pub mod ui;
pub mod views;
pub mod widgets;

// Re-export main types for convenience
pub use app::{App, HostFocus};
pub use buffer::TextBuffer;
pub use config::Config;
pub use editor::{Mode, ModalEditor};
pub use focus::{FocusNode, Key, Keymap, Outcome, Request, ViewParams};
pub use notes::{Note, NoteDb, SaveOutcome};
pub use store::{Store, StoreError};
