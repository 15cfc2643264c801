//! Note record.
//!
//! # Invariants
//! - `category_id` referenced an existing category when the note was created.
//! - `content` is opaque rich-text markup; core never interprets it beyond
//!   deriving plain text for search and previews.

use crate::model::category::CategoryId;
use crate::model::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NoteId = Uuid;

/// Titled rich-text document belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub category_id: CategoryId,
    /// Stored trimmed and never blank.
    pub title: String,
    /// Markup produced by the editing surface, stored verbatim.
    pub content: String,
    pub is_pinned: bool,
    pub is_favorite: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Mutable fields shared by note create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub is_pinned: bool,
    pub is_favorite: bool,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Returns the trimmed title or rejects a blank one.
    pub(crate) fn validated_title(&self) -> Result<String, ValidationError> {
        non_blank(&self.title, ValidationError::BlankNoteTitle)
    }
}

impl Note {
    /// Builds a note in `category_id` with a fresh id and timestamps.
    ///
    /// # Errors
    /// - `ValidationError::BlankNoteTitle` when the draft title trims to nothing.
    pub fn new(
        category_id: CategoryId,
        draft: NoteDraft,
        now_ms: i64,
    ) -> Result<Self, ValidationError> {
        let title = draft.validated_title()?;
        Ok(Self {
            id: Uuid::new_v4(),
            category_id,
            title,
            content: draft.content,
            is_pinned: draft.is_pinned,
            is_favorite: draft.is_favorite,
            created_at: now_ms,
            updated_at: now_ms,
        })
    }
}
