//! Notes persistence: a thin collection handle over the store plus the
//! cached, lazily-loaded [`Note`] document the editor mutates.

use std::rc::Rc;

use crate::store::{Result, Store, StoreError};

/// Partition holding all note records, keyed by title.
const NOTE_PARTITION: &str = "note";

/// What a save did, reported so a listing view can refresh its titles
/// without re-querying the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// First save of a new note; an insert was performed.
    Created,
    /// Save over an existing note; an update was performed.
    Updated,
}

/// Cheap-to-clone handle to the `note` partition.
#[derive(Clone)]
pub struct NoteDb {
    store: Rc<Store>,
}

impl NoteDb {
    pub fn new(store: Rc<Store>) -> Self {
        Self { store }
    }

    /// All note titles, sorted.
    pub fn titles(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .get_partition(NOTE_PARTITION)?
            .into_iter()
            .map(|r| r.sort)
            .collect())
    }

    pub fn value(&self, title: &str) -> Result<Option<String>> {
        self.store.get(NOTE_PARTITION, title)
    }

    /// Load a document for `title`; `new` is true iff no record exists yet.
    pub fn note(&self, title: &str) -> Result<Note> {
        let new = self.value(title)?.is_none();
        Ok(Note {
            db: self.clone(),
            title: title.to_string(),
            new,
            cached: None,
        })
    }

    fn create(&self, title: &str, content: &str) -> Result<()> {
        self.store.insert(NOTE_PARTITION, title, content)
    }

    fn update(&self, title: &str, content: &str) -> Result<()> {
        self.store.update(NOTE_PARTITION, title, content)
    }
}

/// One note's text content, backed by the store.
///
/// The cache is populated lazily (one store lookup on first read) and
/// overwritten in place by `save`, so a handle never re-reads its own
/// writes. It is *not* invalidated by writes made through another handle
/// to the same title; the single event loop makes writes serial, and the
/// last writer wins. `flush_cache` forces freshness when a caller suspects
/// external mutation.
pub struct Note {
    db: NoteDb,
    title: String,
    new: bool,
    cached: Option<String>,
}

impl Note {
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether no record exists yet for this title.
    pub fn is_new(&self) -> bool {
        self.new
    }

    /// Current content. `None` for a fresh, never-saved note; otherwise
    /// loaded from the store at most once and cached.
    pub fn content(&mut self) -> Result<Option<&str>> {
        if !self.new && self.cached.is_none() {
            self.cached = self.db.value(&self.title)?;
        }
        Ok(self.cached.as_deref())
    }

    /// Persist `content` (`None` is normalized to the empty string).
    ///
    /// A new note is inserted and transitions to existing, reported as
    /// [`SaveOutcome::Created`] exactly once; an existing note is updated.
    /// Either way the cache is set to the saved value.
    pub fn save(&mut self, content: Option<&str>) -> Result<SaveOutcome> {
        let content = content.unwrap_or("");
        let outcome = if self.new {
            self.db.create(&self.title, content)?;
            self.new = false;
            SaveOutcome::Created
        } else {
            self.db.update(&self.title, content)?;
            SaveOutcome::Updated
        };
        self.cached = Some(content.to_string());
        tracing::debug!(title = %self.title, ?outcome, "note saved");
        Ok(outcome)
    }

    /// Drop the cached value; the next read re-fetches from the store.
    pub fn flush_cache(&mut self) {
        self.cached = None;
    }
}

/// Idempotent "ensure present" insert: a duplicate pair is treated as
/// already-satisfied, never an error.
pub fn ensure_present(store: &Store, partition: &str, sort: &str, value: &str) -> Result<()> {
    match store.insert(partition, sort, value) {
        Ok(()) => Ok(()),
        Err(StoreError::DuplicateKey { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}
