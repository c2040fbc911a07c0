//! Conference-schedule browser: a track pane (day filter + track list)
//! and an event pane side by side, with a description popup and
//! store-backed favorites.
//!
//! Favorites live under one partition with a composite sort key
//! `date_start_id`, so enumerating the partition yields them in
//! chronological order.

use std::collections::HashMap;
use std::fs;
use std::rc::Rc;

use anyhow::Context;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;
use serde::Deserialize;

use crate::focus::{FocusNode, Key, Keymap, Outcome, Request, ViewParams};
use crate::notes::ensure_present;
use crate::store::Store;
use crate::views::ViewContext;
use crate::widgets::{theme, SelectList};

/// Synthetic track listing the favorited events.
pub const FAVORITES_TRACK: &str = "Favorites";

/// Store partition holding favorite records (sort key `date_start_id`,
/// value = event id).
pub const FAVORITE_PARTITION: &str = "schedule_favorite";

#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleEvent {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub speakers: Vec<String>,
    pub room: String,
    #[serde(default)]
    pub date: String,
    pub start: String,
    pub duration: String,
    /// Raw track name from the file; prefixed with the day during load.
    #[serde(default)]
    pub track: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "abstract")]
    pub abstract_text: String,
}

impl ScheduleEvent {
    /// One list row: start time, title, speakers, duration.
    pub fn summary(&self) -> String {
        format!(
            "{} - {} by {} ({})",
            self.start,
            self.title,
            self.speakers.join(", "),
            self.duration
        )
    }

    /// Popup body: the description, falling back to the abstract.
    pub fn describe(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else if !self.abstract_text.is_empty() {
            &self.abstract_text
        } else {
            "no description given"
        }
    }

    /// Composite favorite sort key: chronological within the partition.
    pub fn favorite_key(&self) -> String {
        format!("{}_{}_{}", self.date, self.start, self.id)
    }
}

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    days: Vec<ScheduleDay>,
}

#[derive(Debug, Deserialize)]
struct ScheduleDay {
    index: u32,
    date: String,
    events: Vec<ScheduleEvent>,
}

#[derive(Debug, Clone)]
pub struct TrackInfo {
    pub date: String,
    pub room: String,
}

/// The pre-shaped, in-memory schedule index: tracks in first-seen order,
/// events by track and by id.
pub struct Schedule {
    tracks: Vec<String>,
    trackinfo: HashMap<String, TrackInfo>,
    by_track: HashMap<String, Vec<usize>>,
    by_id: HashMap<String, usize>,
    events: Vec<ScheduleEvent>,
    day_count: u32,
}

impl Schedule {
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("cannot read schedule file {}", path.display()))?;
        let file: ScheduleFile = serde_json::from_str(&raw)
            .with_context(|| format!("cannot parse schedule file {}", path.display()))?;
        Ok(Self::from_days(file.days))
    }

    fn from_days(days: Vec<ScheduleDay>) -> Self {
        let mut schedule = Self {
            tracks: Vec::new(),
            trackinfo: HashMap::new(),
            by_track: HashMap::new(),
            by_id: HashMap::new(),
            events: Vec::new(),
            day_count: days.len() as u32,
        };

        for day in days {
            for mut event in day.events {
                let track = format!("Day {}: {}", day.index, event.track);
                event.track = track.clone();
                event.date = day.date.clone();

                if !schedule.trackinfo.contains_key(&track) {
                    schedule.tracks.push(track.clone());
                    schedule.trackinfo.insert(
                        track.clone(),
                        TrackInfo {
                            date: day.date.clone(),
                            room: event.room.clone(),
                        },
                    );
                }

                let idx = schedule.events.len();
                schedule.by_id.insert(event.id.clone(), idx);
                schedule.by_track.entry(track).or_default().push(idx);
                schedule.events.push(event);
            }
        }
        schedule
    }

    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    pub fn day_count(&self) -> u32 {
        self.day_count
    }

    pub fn track_info(&self, track: &str) -> Option<&TrackInfo> {
        self.trackinfo.get(track)
    }

    pub fn event(&self, id: &str) -> Option<&ScheduleEvent> {
        self.by_id.get(id).map(|&i| &self.events[i])
    }

    pub fn track_events(&self, track: &str) -> Vec<&ScheduleEvent> {
        self.by_track
            .get(track)
            .map(|ids| ids.iter().map(|&i| &self.events[i]).collect())
            .unwrap_or_default()
    }

    /// Favorited events, chronological, resolved through the store. Ids
    /// that no longer resolve (a different year's file) are skipped.
    pub fn favorites(&self, store: &Store) -> Vec<&ScheduleEvent> {
        match store.get_partition(FAVORITE_PARTITION) {
            Ok(records) => records
                .iter()
                .filter_map(|r| self.event(&r.value))
                .collect(),
            Err(e) => {
                tracing::error!(error = %e, "failed to read favorites");
                Vec::new()
            }
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum ScheduleFocus {
    DayCtrl,
    Tracks,
    Events,
}

pub struct ScheduleView {
    store: Rc<Store>,
    schedule: Schedule,
    day_ctrl: Vec<String>,
    day_selected: usize,
    tracks: SelectList,
    events: SelectList,
    /// Event ids parallel to the `events` rows.
    event_ids: Vec<String>,
    current_track: Option<String>,
    subheader: String,
    focus: ScheduleFocus,
    popup: Option<String>,
}

impl ScheduleView {
    pub fn new(ctx: &ViewContext, _params: ViewParams) -> anyhow::Result<Self> {
        let schedule = Schedule::from_file(&ctx.config.schedule_path)?;
        Ok(Self::with_schedule(ctx.store.clone(), schedule))
    }

    pub fn with_schedule(store: Rc<Store>, schedule: Schedule) -> Self {
        let mut day_ctrl = vec!["All days".to_string()];
        for day in 1..=schedule.day_count() {
            day_ctrl.push(format!("Day {}", day));
        }
        let tracks = SelectList::new(Self::track_rows(&schedule, None));
        Self {
            store,
            schedule,
            day_ctrl,
            day_selected: 0,
            tracks,
            events: SelectList::new(Vec::new()),
            event_ids: Vec::new(),
            current_track: None,
            subheader: "no track selected".to_string(),
            focus: ScheduleFocus::Tracks,
            popup: None,
        }
    }

    /// Track rows under the current day filter; `Favorites` always stays.
    fn track_rows(schedule: &Schedule, day_prefix: Option<&str>) -> Vec<String> {
        let mut rows = vec![FAVORITES_TRACK.to_string()];
        for track in schedule.tracks() {
            let keep = day_prefix.map(|p| track.starts_with(p)).unwrap_or(true);
            if keep {
                rows.push(track.clone());
            }
        }
        rows
    }

    fn apply_day_filter(&mut self) {
        let prefix = match self.day_ctrl[self.day_selected].as_str() {
            "All days" => None,
            day => Some(day.to_string()),
        };
        self.tracks
            .set_items(Self::track_rows(&self.schedule, prefix.as_deref()));
    }

    fn select_track(&mut self, track: &str) {
        let (events, info) = if track == FAVORITES_TRACK {
            (
                self.schedule.favorites(&self.store),
                TrackInfo {
                    date: "?".to_string(),
                    room: "?".to_string(),
                },
            )
        } else {
            let info = self
                .schedule
                .track_info(track)
                .cloned()
                .unwrap_or(TrackInfo {
                    date: "?".to_string(),
                    room: "?".to_string(),
                });
            (self.schedule.track_events(track), info)
        };

        let title = format!("Track: {} ({}) in room {}", track, info.date, info.room);
        self.subheader = if events.is_empty() {
            format!("{} (no events listed)", title)
        } else {
            title
        };
        self.event_ids = events.iter().map(|e| e.id.clone()).collect();
        self.events
            .set_items(events.iter().map(|e| e.summary()).collect());
        self.current_track = Some(track.to_string());
    }

    fn selected_event(&self) -> Option<&ScheduleEvent> {
        let id = self.event_ids.get(self.events.selected_index())?;
        self.schedule.event(id)
    }

    /// Ensure-present semantics: favoriting twice is a no-op, never an
    /// error.
    fn add_favorite(&self) {
        if let Some(event) = self.selected_event() {
            if let Err(e) = ensure_present(
                &self.store,
                FAVORITE_PARTITION,
                &event.favorite_key(),
                &event.id,
            ) {
                tracing::error!(id = %event.id, error = %e, "failed to favorite event");
            }
        }
    }

    fn remove_favorite(&mut self) {
        if let Some(event) = self.selected_event() {
            let key = event.favorite_key();
            if let Err(e) = self.store.delete(FAVORITE_PARTITION, &key) {
                tracing::error!(id = %event.id, error = %e, "failed to unfavorite event");
            }
        }
        if self.current_track.as_deref() == Some(FAVORITES_TRACK) {
            self.select_track(FAVORITES_TRACK);
        }
    }

    fn popup_keypress(&mut self, key: Key) -> Outcome {
        match key {
            Key::Enter | Key::Char('q') | Key::Char('Q') | Key::Esc => {
                self.popup = None;
                Outcome::Consumed
            }
            _ => Outcome::Consumed,
        }
    }

    fn day_ctrl_keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        match key {
            Key::Enter => {
                self.apply_day_filter();
                Outcome::Consumed
            }
            key => {
                let key = match key {
                    Key::Char('h') => Key::Left,
                    Key::Char('l') => Key::Right,
                    other => other,
                };
                match keymap.canonical(key) {
                    Key::Down => {
                        self.focus = ScheduleFocus::Tracks;
                        Outcome::Consumed
                    }
                    Key::Left => {
                        self.day_selected = self.day_selected.saturating_sub(1);
                        Outcome::Consumed
                    }
                    Key::Right => {
                        if self.day_selected + 1 < self.day_ctrl.len() {
                            self.day_selected += 1;
                        }
                        Outcome::Consumed
                    }
                    _ => Outcome::Pass(key),
                }
            }
        }
    }

    fn tracks_keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        match key {
            Key::Enter => {
                if let Some(track) = self.tracks.selected().map(str::to_string) {
                    self.select_track(&track);
                }
                Outcome::Consumed
            }
            Key::Tab => {
                self.focus = ScheduleFocus::DayCtrl;
                Outcome::Consumed
            }
            key => {
                let canonical = keymap.canonical(key);
                if canonical == Key::Up && self.tracks.at_top() {
                    self.focus = ScheduleFocus::DayCtrl;
                    Outcome::Consumed
                } else if self.tracks.scroll(canonical) {
                    Outcome::Consumed
                } else {
                    Outcome::Pass(key)
                }
            }
        }
    }

    fn events_keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        match key {
            Key::Char('f') => {
                self.add_favorite();
                Outcome::Consumed
            }
            Key::Char('d') => {
                self.remove_favorite();
                Outcome::Consumed
            }
            Key::Char('N') => match self.selected_event() {
                Some(event) => {
                    // cap the derived title at 120 characters, never
                    // splitting a multi-byte one
                    let mut track = event.track.clone();
                    if let Some((at, _)) = track.char_indices().nth(120) {
                        track.truncate(at);
                    }
                    Outcome::Request(Request::SwitchView {
                        name: "notes".to_string(),
                        params: ViewParams::open(format!("schedule/{}", track)),
                    })
                }
                None => Outcome::Consumed,
            },
            Key::Enter => {
                if let Some(event) = self.selected_event() {
                    self.popup = Some(event.describe().to_string());
                }
                Outcome::Consumed
            }
            key => {
                if self.events.scroll(keymap.canonical(key)) {
                    Outcome::Consumed
                } else {
                    Outcome::Pass(key)
                }
            }
        }
    }
}

impl FocusNode for ScheduleView {
    fn keypress(&mut self, key: Key, keymap: &Keymap) -> Outcome {
        if self.popup.is_some() {
            return self.popup_keypress(key);
        }

        let outcome = match self.focus {
            ScheduleFocus::DayCtrl => self.day_ctrl_keypress(key, keymap),
            ScheduleFocus::Tracks => self.tracks_keypress(key, keymap),
            ScheduleFocus::Events => self.events_keypress(key, keymap),
        };

        // pane-level interception of whatever the focused child declined
        match outcome {
            Outcome::Pass(key) => {
                let key = match key {
                    Key::Char('h') => Key::Left,
                    Key::Char('l') => Key::Right,
                    other => other,
                };
                match key {
                    Key::Left => {
                        self.focus = ScheduleFocus::Tracks;
                        Outcome::Consumed
                    }
                    Key::Right => {
                        self.focus = ScheduleFocus::Events;
                        Outcome::Consumed
                    }
                    other => Outcome::Pass(other),
                }
            }
            other => other,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(area);

        // track pane: day control row over the track list
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(panes[0]);

        let ctrl_focused = focused && self.focus == ScheduleFocus::DayCtrl;
        let mut spans = Vec::new();
        for (i, day) in self.day_ctrl.iter().enumerate() {
            if i == self.day_selected && ctrl_focused {
                spans.push(ratatui::text::Span::styled(day.clone(), theme::active()));
            } else {
                spans.push(ratatui::text::Span::raw(day.clone()));
            }
            spans.push(ratatui::text::Span::raw("  "));
        }
        frame.render_widget(
            Paragraph::new(ratatui::text::Line::from(spans)),
            left[0],
        );

        self.tracks
            .render(frame, left[1], focused && self.focus == ScheduleFocus::Tracks);

        // event pane: subheader over the event list
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(panes[1]);
        frame.render_widget(
            Paragraph::new(self.subheader.clone())
                .alignment(ratatui::layout::Alignment::Center)
                .style(theme::subheader()),
            right[0],
        );
        self.events
            .render(frame, right[1], focused && self.focus == ScheduleFocus::Events);

        if let Some(text) = &self.popup {
            let w = area.width * 4 / 5;
            let h = area.height * 4 / 5;
            let popup_area = Rect {
                x: area.x + (area.width - w) / 2,
                y: area.y + (area.height - h) / 2,
                width: w,
                height: h,
            };
            frame.render_widget(Clear, popup_area);
            frame.render_widget(
                Paragraph::new(text.clone())
                    .wrap(Wrap { trim: false })
                    .block(ratatui::widgets::Block::bordered()),
                popup_area,
            );
        }
    }
}
