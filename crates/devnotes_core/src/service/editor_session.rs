//! One note-editing session: current markup, undo log and input debounce.
//!
//! # Invariants
//! - Opening a session always starts from an empty history.
//! - At most one debounce deadline is armed; new input re-arms it.
//! - Formatting commands snapshot immediately and disarm pending input.

use crate::search::plain_text;
use crate::service::history::EditorHistory;

/// Quiet period after raw input before a snapshot is taken.
pub const SNAPSHOT_DEBOUNCE_MS: i64 = 500;

#[derive(Debug, Clone)]
pub struct EditorSession {
    history: EditorHistory,
    content: String,
    snapshot_due_at: Option<i64>,
}

impl EditorSession {
    /// Starts a session for a new note (no initial snapshot).
    pub fn blank() -> Self {
        Self {
            history: EditorHistory::new(),
            content: String::new(),
            snapshot_due_at: None,
        }
    }

    /// Starts a session over existing markup, recorded as the first snapshot.
    pub fn editing(content: impl Into<String>) -> Self {
        let mut session = Self::blank();
        session.content = content.into();
        session.history.snapshot(&session.content);
        session
    }

    /// Raw text input. Arms (or re-arms) the debounce deadline.
    pub fn input(&mut self, content: impl Into<String>, now_ms: i64) {
        self.content = content.into();
        self.snapshot_due_at = Some(now_ms + SNAPSHOT_DEBOUNCE_MS);
    }

    /// Fires the debounce when its deadline has passed. Returns whether a
    /// snapshot was recorded.
    pub fn tick(&mut self, now_ms: i64) -> bool {
        match self.snapshot_due_at {
            Some(due_at) if now_ms >= due_at => {
                self.snapshot_due_at = None;
                self.history.snapshot(&self.content)
            }
            _ => false,
        }
    }

    /// Applies the markup produced by a formatting command and snapshots it.
    pub fn apply_format(&mut self, content: impl Into<String>) -> bool {
        self.content = content.into();
        self.snapshot_due_at = None;
        self.history.snapshot(&self.content)
    }

    /// Records any pending input without waiting for the debounce.
    pub fn flush(&mut self) -> bool {
        if self.snapshot_due_at.take().is_some() {
            return self.history.snapshot(&self.content);
        }
        false
    }

    /// Moves back one snapshot and makes it the current content.
    pub fn undo(&mut self) -> Option<&str> {
        self.snapshot_due_at = None;
        let previous = self.history.undo()?.to_string();
        self.content = previous;
        Some(&self.content)
    }

    /// Moves forward one snapshot and makes it the current content.
    pub fn redo(&mut self) -> Option<&str> {
        self.snapshot_due_at = None;
        let next = self.history.redo()?.to_string();
        self.content = next;
        Some(&self.content)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn history(&self) -> &EditorHistory {
        &self.history
    }

    pub fn has_pending_snapshot(&self) -> bool {
        self.snapshot_due_at.is_some()
    }

    /// Length of the visible text, as shown under the editor.
    pub fn char_count(&self) -> usize {
        plain_text(&self.content).chars().count()
    }
}
