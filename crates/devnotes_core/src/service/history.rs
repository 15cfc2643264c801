//! Bounded linear undo/redo log for one note-editing session.
//!
//! # Invariants
//! - `cursor` is `None` exactly when the log is empty, otherwise a valid index.
//! - The log never holds more than `max_entries` snapshots.
//! - Recording while the cursor is behind the tail discards the redo branch.
//! - The entry at the cursor is never recorded twice in a row.

use std::collections::VecDeque;

/// Default capacity of the undo log.
pub const HISTORY_MAX_ENTRIES: usize = 50;

#[derive(Debug, Clone)]
pub struct EditorHistory {
    entries: VecDeque<String>,
    cursor: Option<usize>,
    max_entries: usize,
}

impl Default for EditorHistory {
    fn default() -> Self {
        Self::with_capacity(HISTORY_MAX_ENTRIES)
    }
}

impl EditorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a log holding at most `max_entries` snapshots (minimum 1).
    pub fn with_capacity(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries),
            cursor: None,
            max_entries,
        }
    }

    /// Drops every snapshot. Called when an editing session opens.
    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = None;
    }

    /// Records `content` as the newest snapshot.
    ///
    /// Returns `false` when `content` equals the entry at the cursor.
    pub fn snapshot(&mut self, content: &str) -> bool {
        if self.current() == Some(content) {
            return false;
        }

        if let Some(cursor) = self.cursor {
            self.entries.truncate(cursor + 1);
        }
        self.entries.push_back(content.to_string());

        if self.entries.len() > self.max_entries {
            // Window slides; the cursor keeps pointing at the newest entry.
            self.entries.pop_front();
        } else {
            self.cursor = Some(self.cursor.map_or(0, |cursor| cursor + 1));
        }
        true
    }

    /// Steps back one snapshot and returns it, or `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|cursor| *cursor > 0)?;
        self.cursor = Some(cursor - 1);
        self.current()
    }

    /// Steps forward one snapshot and returns it, or `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&str> {
        let cursor = self.cursor.filter(|cursor| cursor + 1 < self.entries.len())?;
        self.cursor = Some(cursor + 1);
        self.current()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> Option<&str> {
        self.cursor
            .and_then(|cursor| self.entries.get(cursor))
            .map(String::as_str)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some_and(|cursor| cursor > 0)
    }

    pub fn can_redo(&self) -> bool {
        self.cursor
            .is_some_and(|cursor| cursor + 1 < self.entries.len())
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Snapshots from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}
