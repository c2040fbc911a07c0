//! System log view: a read-only, regex-parsed rendering of a
//! line-oriented log file, opened at the tail.

use std::fs;

use anyhow::Context;
use once_cell::sync::Lazy;
use ratatui::layout::Rect;
use ratatui::Frame;
use regex::Regex;

use crate::focus::{FocusNode, Key, Keymap, Outcome, ViewParams};
use crate::views::ViewContext;
use crate::widgets::SelectList;

static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?P<date>\S+\s+\S+)\s+(?P<time>\S+)\s+
        (?P<host>\S+)\s+
        (?P<service>[A-Za-z0-9/_.-]+)(?:\[\d+\])?:
        (?P<msg>.*)$
    ",
    )
    .expect("log line pattern is valid")
});

/// One parsed log line. Unparseable input degrades to placeholder fields
/// rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub date: String,
    pub time: String,
    pub host: String,
    pub service: String,
    pub msg: String,
}

impl LogLine {
    pub fn parse(line: &str) -> Self {
        match LINE_RE.captures(line) {
            Some(caps) => Self {
                date: caps["date"].to_string(),
                time: caps["time"].to_string(),
                host: caps["host"].to_string(),
                service: caps["service"].to_string(),
                msg: caps["msg"].trim_start().to_string(),
            },
            None => Self {
                date: "???".to_string(),
                time: "???".to_string(),
                host: "unknown".to_string(),
                service: "unknown".to_string(),
                msg: format!("unparsed line: {}", line),
            },
        }
    }

    /// Fixed-width columns: timestamp, service, message.
    pub fn row(&self) -> String {
        format!(
            "{:<15}  {:<16}  {}",
            truncate(&format!("{} {}", self.date, self.time), 15),
            truncate(&self.service, 16),
            self.msg
        )
    }
}

fn truncate(s: &str, width: usize) -> &str {
    match s.char_indices().nth(width) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

pub struct LogView {
    list: SelectList,
}

impl LogView {
    pub fn new(ctx: &ViewContext, _params: ViewParams) -> anyhow::Result<Self> {
        let path = &ctx.config.log_path;
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read log file {}", path.display()))?;
        Ok(Self::from_lines(raw.lines()))
    }

    pub fn from_lines<'a>(lines: impl Iterator<Item = &'a str>) -> Self {
        let rows: Vec<String> = lines
            .map(str::trim_end)
            .map(|l| LogLine::parse(l).row())
            .collect();
        let mut list = SelectList::new(rows);
        list.select_last();
        Self { list }
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn selected_row(&self) -> Option<&str> {
        self.list.selected()
    }
}

impl FocusNode for LogView {
    fn keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        if self.list.scroll(keymap.canonical(key)) {
            Outcome::Consumed
        } else {
            Outcome::Pass(key)
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        self.list.render(frame, area, focused);
    }
}
