//! Transient view state: never persisted.

use crate::model::category::CategoryId;
use crate::model::note::NoteId;

/// Screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Categories,
    /// Notes grid of one category.
    Notes(CategoryId),
    /// Favorite notes across every category.
    Favorites,
    Settings,
}

impl ActiveView {
    pub fn name(self) -> &'static str {
        match self {
            Self::Categories => "categories",
            Self::Notes(_) => "notes",
            Self::Favorites => "favorites",
            Self::Settings => "settings",
        }
    }
}

/// Entity targeted by the delete confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    Category(CategoryId),
    Note(NoteId),
}

impl DeleteTarget {
    /// Confirmation text shown in the second step of the delete flow.
    pub fn warning(self) -> &'static str {
        match self {
            Self::Category(_) => {
                "Are you sure you want to delete this category? All notes in this category will also be deleted. This action cannot be undone."
            }
            Self::Note(_) => "Are you sure you want to delete this note? This action cannot be undone.",
        }
    }
}

/// Form being edited: `None` inside means "create".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenForm {
    Category(Option<CategoryId>),
    Note(Option<NoteId>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_view: ActiveView,
    pub active_note: Option<NoteId>,
    pub search_query: String,
    pub open_form: Option<OpenForm>,
    pub pending_delete: Option<DeleteTarget>,
}

impl ViewState {
    /// Category whose notes grid is shown, if any.
    pub fn active_category(&self) -> Option<CategoryId> {
        match self.active_view {
            ActiveView::Notes(id) => Some(id),
            _ => None,
        }
    }

    pub fn editing_category_id(&self) -> Option<CategoryId> {
        match self.open_form {
            Some(OpenForm::Category(id)) => id,
            _ => None,
        }
    }

    pub fn editing_note_id(&self) -> Option<NoteId> {
        match self.open_form {
            Some(OpenForm::Note(id)) => id,
            _ => None,
        }
    }
}
