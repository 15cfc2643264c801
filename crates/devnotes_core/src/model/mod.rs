//! Domain model for categories, notes and display preferences.
//!
//! # Responsibility
//! - Define the records mirrored to local storage.
//! - Define the closed icon/color/theme vocabularies.
//!
//! # Invariants
//! - Every category and note is identified by a random, never reused UUID.
//! - Timestamps are Unix epoch milliseconds.
//! - Serialized field names are camelCase to keep the export format stable.

pub mod category;
pub mod note;
pub mod preferences;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected user input for category and note forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Category name is empty after trimming.
    BlankCategoryName,
    /// Note title is empty after trimming.
    BlankNoteTitle,
    /// Token is not part of a closed vocabulary (icon, color, theme).
    UnknownToken {
        kind: &'static str,
        value: String,
    },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankCategoryName => write!(f, "category name cannot be blank"),
            Self::BlankNoteTitle => write!(f, "note title cannot be blank"),
            Self::UnknownToken { kind, value } => write!(f, "unknown {kind} `{value}`"),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing remains.
pub(crate) fn non_blank(value: &str, err: ValidationError) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(err)
    } else {
        Ok(trimmed.to_string())
    }
}
