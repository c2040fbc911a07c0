//! Integration tests for the modal editor state machine
//!
//! Exercises the pure transition table, the command dispatch and the
//! movement semantics against a real in-memory store.

use std::rc::Rc;

use deck::editor::{transition, Effect, Mode, ModalEditor};
use deck::focus::{FocusNode, Key, Keymap, Outcome, Request};
use deck::notes::NoteDb;
use deck::store::Store;

fn editor_fixture(title: &str) -> (ModalEditor, NoteDb, Rc<Store>) {
    let store = Rc::new(Store::open_in_memory().unwrap());
    let db = NoteDb::new(store.clone());
    let editor = ModalEditor::open(&db, title).unwrap();
    (editor, db, store)
}

fn press(editor: &mut ModalEditor, key: Key) -> Outcome {
    editor.keypress(key, &Keymap::vi_lists())
}

fn type_chars(editor: &mut ModalEditor, text: &str) {
    for c in text.chars() {
        let _ = press(editor, Key::Char(c));
    }
}

#[test]
fn test_transition_normal_to_insert_and_command() {
    let (next, effects) = transition(Mode::Normal, Key::Char('i')).unwrap();
    assert_eq!(next, Mode::Insert);
    assert!(effects.contains(&Effect::SetCaption("(ins)")));

    let (next, effects) = transition(Mode::Normal, Key::Char(':')).unwrap();
    assert_eq!(next, Mode::Command);
    assert!(effects.contains(&Effect::SetCaption(":")));
    assert!(effects.contains(&Effect::FocusPrompt));
}

#[test]
fn test_transition_unbound_normal_key_is_not_claimed() {
    assert!(transition(Mode::Normal, Key::Char('x')).is_none());
    assert!(transition(Mode::Normal, Key::Enter).is_none());
    assert!(transition(Mode::Normal, Key::Tab).is_none());
}

#[test]
fn test_transition_same_mode_never_rewrites_caption() {
    for key in ['h', 'j', 'k', 'l', 'g', '^', '$'] {
        let (next, effects) = transition(Mode::Normal, Key::Char(key)).unwrap();
        assert_eq!(next, Mode::Normal);
        assert!(effects
            .iter()
            .all(|e| !matches!(e, Effect::SetCaption(_))));
    }
}

#[test]
fn test_insert_then_escape_round_trip_leaves_buffer_unchanged() {
    let (mut editor, _db, _store) = editor_fixture("scratch");
    let before = editor.buffer.text();

    assert!(matches!(press(&mut editor, Key::Char('i')), Outcome::Consumed));
    assert_eq!(editor.mode(), Mode::Insert);
    assert!(matches!(press(&mut editor, Key::Esc), Outcome::Consumed));
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.buffer.text(), before);
}

#[test]
fn test_insert_mode_edits_the_buffer() {
    let (mut editor, _db, _store) = editor_fixture("scratch");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "hello");
    let _ = press(&mut editor, Key::Enter);
    type_chars(&mut editor, "world");
    let _ = press(&mut editor, Key::Esc);

    assert_eq!(editor.buffer.text(), "hello\nworld");
    assert_eq!(editor.mode(), Mode::Normal);
}

#[test]
fn test_write_command_saves_exactly_once() {
    let (mut editor, _db, store) = editor_fixture("todo");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "buy milk");
    let _ = press(&mut editor, Key::Esc);

    let _ = press(&mut editor, Key::Char(':'));
    assert_eq!(editor.mode(), Mode::Command);
    type_chars(&mut editor, "w");
    let outcome = press(&mut editor, Key::Enter);

    // first save of a new note surfaces the created notification
    assert!(matches!(
        outcome,
        Outcome::Request(Request::NoteCreated(ref t)) if t == "todo"
    ));
    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.prompt_text(), "");
    assert_eq!(
        store.get("note", "todo").unwrap().as_deref(),
        Some("buy milk")
    );
}

#[test]
fn test_second_write_updates_without_notification() {
    let (mut editor, _db, store) = editor_fixture("todo");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "v1");
    let _ = press(&mut editor, Key::Esc);

    let _ = press(&mut editor, Key::Char(':'));
    type_chars(&mut editor, "w");
    let _ = press(&mut editor, Key::Enter);

    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "!");
    let _ = press(&mut editor, Key::Esc);
    let _ = press(&mut editor, Key::Char(':'));
    type_chars(&mut editor, "w");
    let outcome = press(&mut editor, Key::Enter);

    assert!(matches!(outcome, Outcome::Consumed));
    assert_eq!(store.get("note", "todo").unwrap().as_deref(), Some("v1!"));
}

#[test]
fn test_escape_abandons_the_prompt_without_dispatch() {
    let (mut editor, _db, store) = editor_fixture("todo");
    let _ = press(&mut editor, Key::Char(':'));
    type_chars(&mut editor, "w");
    let _ = press(&mut editor, Key::Esc);

    assert_eq!(editor.mode(), Mode::Normal);
    assert_eq!(editor.prompt_text(), "");
    assert_eq!(store.get("note", "todo").unwrap(), None);
}

#[test]
fn test_unknown_and_reserved_commands_are_silent() {
    let (mut editor, _db, store) = editor_fixture("todo");

    for cmd in ["frobnicate", "set wrap on", "w extra args here", ""] {
        let _ = press(&mut editor, Key::Char(':'));
        type_chars(&mut editor, cmd);
        let _ = press(&mut editor, Key::Enter);
        assert_eq!(editor.mode(), Mode::Normal);
        assert_eq!(editor.prompt_text(), "");
    }

    // only the `w` variants actually wrote
    assert_eq!(store.get("note", "todo").unwrap().as_deref(), Some(""));
}

#[test]
fn test_unbound_normal_key_bubbles_up() {
    let (mut editor, _db, _store) = editor_fixture("scratch");
    assert!(matches!(
        press(&mut editor, Key::Char('x')),
        Outcome::Pass(Key::Char('x'))
    ));
    assert!(matches!(
        press(&mut editor, Key::Tab),
        Outcome::Pass(Key::Tab)
    ));
}

#[test]
fn test_movement_keys() {
    let (mut editor, _db, _store) = editor_fixture("scratch");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "alpha");
    let _ = press(&mut editor, Key::Enter);
    type_chars(&mut editor, "beta");
    let _ = press(&mut editor, Key::Enter);
    type_chars(&mut editor, "gamma");
    let _ = press(&mut editor, Key::Esc);
    assert_eq!(editor.buffer.cursor, (2, 5));

    let _ = press(&mut editor, Key::Char('h'));
    assert_eq!(editor.buffer.cursor, (2, 4));
    let _ = press(&mut editor, Key::Char('l'));
    assert_eq!(editor.buffer.cursor, (2, 5));
    let _ = press(&mut editor, Key::Char('k'));
    assert_eq!(editor.buffer.cursor, (1, 4)); // clamped to "beta"
    let _ = press(&mut editor, Key::Char('j'));
    assert_eq!(editor.buffer.cursor, (2, 4));
    let _ = press(&mut editor, Key::Char('g'));
    assert_eq!(editor.buffer.cursor, (0, 4));
}

#[test]
fn test_line_start_and_end_of_line_are_identical() {
    let (mut editor, _db, _store) = editor_fixture("scratch");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "some text");
    let _ = press(&mut editor, Key::Esc);

    let _ = press(&mut editor, Key::Char('^'));
    assert_eq!(editor.buffer.cursor, (0, 0));

    let _ = press(&mut editor, Key::Char('l'));
    // `$` reproduces the observed behavior: start of line, same as `^`
    let _ = press(&mut editor, Key::Char('$'));
    assert_eq!(editor.buffer.cursor, (0, 0));
}

#[test]
fn test_movement_is_clamped_by_the_buffer() {
    let (mut editor, _db, _store) = editor_fixture("scratch");

    // empty buffer: every motion stays at the origin
    for key in ['h', 'j', 'k', 'l', 'g', '^', '$'] {
        let _ = press(&mut editor, Key::Char(key));
        assert_eq!(editor.buffer.cursor, (0, 0));
    }
}

#[test]
fn test_multibyte_text_is_edited_on_char_boundaries() {
    let (mut editor, _db, store) = editor_fixture("intl");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "café");
    let _ = press(&mut editor, Key::Char('s'));
    assert_eq!(editor.buffer.text(), "cafés");

    let _ = press(&mut editor, Key::Backspace);
    let _ = press(&mut editor, Key::Backspace);
    assert_eq!(editor.buffer.text(), "caf");
    type_chars(&mut editor, "é");
    let _ = press(&mut editor, Key::Esc);

    // columns count characters, so motion lands between them
    assert_eq!(editor.buffer.cursor, (0, 4));
    let _ = press(&mut editor, Key::Char('h'));
    assert_eq!(editor.buffer.cursor, (0, 3));

    let _ = press(&mut editor, Key::Char(':'));
    type_chars(&mut editor, "w");
    let _ = press(&mut editor, Key::Enter);
    assert_eq!(store.get("note", "intl").unwrap().as_deref(), Some("café"));
}

#[test]
fn test_multibyte_line_split_and_join() {
    let (mut editor, _db, _store) = editor_fixture("intl");
    let _ = press(&mut editor, Key::Char('i'));
    type_chars(&mut editor, "héllo");
    let _ = press(&mut editor, Key::Esc);

    // split right after the accented character
    let _ = press(&mut editor, Key::Char('^'));
    let _ = press(&mut editor, Key::Char('l'));
    let _ = press(&mut editor, Key::Char('l'));
    let _ = press(&mut editor, Key::Char('i'));
    let _ = press(&mut editor, Key::Enter);
    assert_eq!(editor.buffer.text(), "hé\nllo");

    // and join back together
    let _ = press(&mut editor, Key::Backspace);
    assert_eq!(editor.buffer.text(), "héllo");
    assert_eq!(editor.buffer.cursor, (0, 2));

    let _ = press(&mut editor, Key::Delete);
    assert_eq!(editor.buffer.text(), "hélo");
}

#[test]
fn test_prompt_handles_multibyte_input() {
    let (mut editor, _db, store) = editor_fixture("intl");
    let _ = press(&mut editor, Key::Char(':'));
    type_chars(&mut editor, "wé");
    assert_eq!(editor.prompt_text(), "wé");

    let _ = press(&mut editor, Key::Backspace);
    assert_eq!(editor.prompt_text(), "w");

    // cursor steps over whole characters, not bytes
    type_chars(&mut editor, "é");
    let _ = press(&mut editor, Key::Left);
    let _ = press(&mut editor, Key::Char('x'));
    assert_eq!(editor.prompt_text(), "wxé");

    let _ = press(&mut editor, Key::Esc);
    assert_eq!(store.get("note", "intl").unwrap(), None);
}

#[test]
fn test_existing_note_content_loads_into_buffer() {
    let store = Rc::new(Store::open_in_memory().unwrap());
    let db = NoteDb::new(store.clone());
    db.note("todo").unwrap().save(Some("line one\nline two")).unwrap();

    let editor = ModalEditor::open(&db, "todo").unwrap();
    assert_eq!(editor.buffer.text(), "line one\nline two");
    assert_eq!(editor.mode(), Mode::Normal);
}
