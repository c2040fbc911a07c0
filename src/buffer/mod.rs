//! # Text Buffer
//!
//! In-memory line/column text region edited by the modal editor. Holds the
//! lines, the cursor, and the basic editing operations Insert mode forwards
//! to. The buffer owns all clamping: callers may request any coordinates
//! and get a valid cursor back.

/// A mutable text region addressed by `(line, column)`.
///
/// Columns count characters, not bytes; all string indexing goes through
/// [`byte_at`] so multi-byte input never lands off a char boundary.
#[derive(Clone, Debug)]
pub struct TextBuffer {
    pub lines: Vec<String>,
    /// (line, column); always within bounds.
    pub cursor: (usize, usize),
    pub modified: bool,
}

/// Byte offset of the `col`-th character of `line` (end of line when
/// `col` is past the last character).
fn byte_at(line: &str, col: usize) -> usize {
    line.char_indices()
        .nth(col)
        .map(|(i, _)| i)
        .unwrap_or(line.len())
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            cursor: (0, 0),
            modified: false,
        }
    }

    pub fn from_text(text: &str) -> Self {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        Self {
            lines: if lines.is_empty() {
                vec![String::new()]
            } else {
                lines
            },
            cursor: (0, 0),
            modified: false,
        }
    }

    /// Buffer content as one string, newline-joined.
    pub fn text(&self) -> String {
        let total: usize = self.lines.iter().map(|l| l.len() + 1).sum();
        let mut out = String::with_capacity(total.saturating_sub(1));
        for (i, line) in self.lines.iter().enumerate() {
            out.push_str(line);
            if i < self.lines.len() - 1 {
                out.push('\n');
            }
        }
        out
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Character length of `line`.
    pub fn line_len(&self, line: usize) -> usize {
        self.lines[line].chars().count()
    }

    /// Move the cursor to `(line, col)`, clamping both coordinates into
    /// range. Out-of-range requests are the caller's prerogative.
    pub fn move_to(&mut self, line: usize, col: usize) {
        let line = line.min(self.lines.len().saturating_sub(1));
        let col = col.min(self.line_len(line));
        self.cursor = (line, col);
    }

    pub fn insert_char(&mut self, c: char) {
        let (line, col) = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_at(text, col);
        text.insert(at, c);
        self.cursor = (line, col + 1);
        self.modified = true;
    }

    pub fn insert_newline(&mut self) {
        let (line, col) = self.cursor;
        let text = &mut self.lines[line];
        let at = byte_at(text, col);
        let rest = text.split_off(at);
        self.lines.insert(line + 1, rest);
        self.cursor = (line + 1, 0);
        self.modified = true;
    }

    /// Delete the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        let (line, col) = self.cursor;
        if col > 0 {
            let at = byte_at(&self.lines[line], col - 1);
            self.lines[line].remove(at);
            self.cursor = (line, col - 1);
            self.modified = true;
        } else if line > 0 {
            let current = self.lines.remove(line);
            let prev = &mut self.lines[line - 1];
            let joined_at = prev.chars().count();
            prev.push_str(&current);
            self.cursor = (line - 1, joined_at);
            self.modified = true;
        }
    }

    /// Delete the character under the cursor, joining with the next line
    /// at end of line.
    pub fn delete(&mut self) {
        let (line, col) = self.cursor;
        if col < self.line_len(line) {
            let at = byte_at(&self.lines[line], col);
            self.lines[line].remove(at);
            self.modified = true;
        } else if line + 1 < self.lines.len() {
            let next = self.lines.remove(line + 1);
            self.lines[line].push_str(&next);
            self.modified = true;
        }
    }

    pub fn move_up(&mut self) {
        let (line, col) = self.cursor;
        self.move_to(line.saturating_sub(1), col);
    }

    pub fn move_down(&mut self) {
        let (line, col) = self.cursor;
        self.move_to(line + 1, col);
    }

    pub fn move_left(&mut self) {
        let (line, col) = self.cursor;
        self.move_to(line, col.saturating_sub(1));
    }

    pub fn move_right(&mut self) {
        let (line, col) = self.cursor;
        self.move_to(line, col + 1);
    }
}
