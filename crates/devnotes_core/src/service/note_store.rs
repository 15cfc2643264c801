//! Domain store: in-memory categories and notes mirrored to local storage.
//!
//! # Responsibility
//! - Own the two entity collections and every mutation on them.
//! - Write the affected collection through `StateRepository` on each change.
//! - Answer listing and search queries for the view layer.
//!
//! # Invariants
//! - In-memory state changes only after the corresponding write succeeded.
//! - Category deletion cascades to exactly the notes referencing it.
//! - Note listings are pinned-first, then newest `updated_at` first; ties keep
//!   insertion order.
//! - Unknown ids on update/delete/toggle are silent no-ops (`Ok(None)`).

use crate::clock::Clock;
use crate::model::category::{Category, CategoryColor, CategoryIcon, CategoryId};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::{non_blank, ValidationError};
use crate::repo::kv_repo::KvRepository;
use crate::repo::state_repo::StateRepository;
use crate::repo::RepoError;
use crate::search::matches_query;
use crate::service::seed::sample_data;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store error for category/note use-cases.
#[derive(Debug)]
pub enum StoreError {
    /// Input rejected by form validation.
    Validation(ValidationError),
    /// Note creation referenced a category that does not exist.
    UnknownCategory(CategoryId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::UnknownCategory(id) => write!(f, "category not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::UnknownCategory(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ValidationError> for StoreError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl StoreError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// A deleted category together with the notes removed by the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRemoval {
    pub category: Category,
    pub removed_notes: Vec<Note>,
}

/// Export file shape: both collections, in storage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub categories: Vec<Category>,
    pub notes: Vec<Note>,
}

pub struct NoteStore<R: KvRepository> {
    repo: StateRepository<R>,
    clock: Rc<dyn Clock>,
    categories: Vec<Category>,
    notes: Vec<Note>,
}

impl<R: KvRepository> NoteStore<R> {
    /// Loads persisted collections, writing sample data when no category exists.
    pub fn open(repo: StateRepository<R>, clock: Rc<dyn Clock>) -> StoreResult<Self> {
        let categories = repo.load_categories()?;
        let notes = repo.load_notes()?;
        let mut store = Self {
            repo,
            clock,
            categories,
            notes,
        };
        info!(
            "event=store_load module=service status=ok categories={} notes={}",
            store.categories.len(),
            store.notes.len()
        );
        if store.categories.is_empty() {
            store.seed_sample_data()?;
        }
        Ok(store)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Creates a category with a trimmed, non-blank name.
    pub fn create_category(
        &mut self,
        name: &str,
        icon: CategoryIcon,
        color: CategoryColor,
    ) -> StoreResult<Category> {
        let category = Category::new(name, icon, color, self.clock.now_ms())?;
        let mut next = self.categories.clone();
        next.push(category.clone());
        self.commit_categories(next)?;
        info!(
            "event=category_create module=service status=ok category_id={}",
            category.id
        );
        Ok(category)
    }

    /// Replaces name/icon/color and refreshes `updated_at`.
    ///
    /// Returns `Ok(None)` when `id` is unknown.
    pub fn update_category(
        &mut self,
        id: CategoryId,
        name: &str,
        icon: CategoryIcon,
        color: CategoryColor,
    ) -> StoreResult<Option<Category>> {
        let Some(index) = self.categories.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        let name = non_blank(name, ValidationError::BlankCategoryName)?;
        let mut next = self.categories.clone();
        let category = &mut next[index];
        category.name = name;
        category.icon = icon;
        category.color = color;
        category.updated_at = self.clock.now_ms();
        let updated = category.clone();
        self.commit_categories(next)?;
        Ok(Some(updated))
    }

    /// Removes a category and every note that references it.
    ///
    /// Returns `Ok(None)` when `id` is unknown.
    pub fn delete_category(&mut self, id: CategoryId) -> StoreResult<Option<CategoryRemoval>> {
        let Some(category) = self.category(id).cloned() else {
            return Ok(None);
        };
        let categories: Vec<Category> = self
            .categories
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        let (removed_notes, notes): (Vec<Note>, Vec<Note>) = self
            .notes
            .iter()
            .cloned()
            .partition(|note| note.category_id == id);

        self.repo.save_collections(&categories, &notes)?;
        self.categories = categories;
        self.notes = notes;
        info!(
            "event=category_delete module=service status=ok category_id={id} cascaded_notes={}",
            removed_notes.len()
        );
        Ok(Some(CategoryRemoval {
            category,
            removed_notes,
        }))
    }

    /// Creates a note inside an existing category.
    pub fn create_note(&mut self, category_id: CategoryId, draft: NoteDraft) -> StoreResult<Note> {
        draft.validated_title()?;
        if self.category(category_id).is_none() {
            return Err(StoreError::UnknownCategory(category_id));
        }
        let note = Note::new(category_id, draft, self.clock.now_ms())?;
        let mut next = self.notes.clone();
        next.push(note.clone());
        self.commit_notes(next)?;
        info!(
            "event=note_create module=service status=ok note_id={} category_id={category_id}",
            note.id
        );
        Ok(note)
    }

    /// Replaces title, content and flags; `category_id` is preserved.
    ///
    /// Returns `Ok(None)` when `id` is unknown.
    pub fn update_note(&mut self, id: NoteId, draft: NoteDraft) -> StoreResult<Option<Note>> {
        if self.note(id).is_none() {
            return Ok(None);
        }
        let title = draft.validated_title()?;
        let now_ms = self.clock.now_ms();
        self.modify_note(id, |note| {
            note.title = title;
            note.content = draft.content;
            note.is_pinned = draft.is_pinned;
            note.is_favorite = draft.is_favorite;
            note.updated_at = now_ms;
        })
    }

    /// Removes one note. Returns `Ok(None)` when `id` is unknown.
    pub fn delete_note(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };
        let mut next = self.notes.clone();
        let removed = next.remove(index);
        self.commit_notes(next)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(Some(removed))
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        let now_ms = self.clock.now_ms();
        self.modify_note(id, |note| {
            note.is_pinned = !note.is_pinned;
            note.updated_at = now_ms;
        })
    }

    pub fn toggle_favorite(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        let now_ms = self.clock.now_ms();
        self.modify_note(id, |note| {
            note.is_favorite = !note.is_favorite;
            note.updated_at = now_ms;
        })
    }

    /// Notes of one category matching `query`, in listing order.
    pub fn list_by_category(&self, category_id: CategoryId, query: &str) -> Vec<&Note> {
        self.list_where(query, |note| note.category_id == category_id)
    }

    /// Favorite notes of every category matching `query`, in listing order.
    pub fn list_favorites(&self, query: &str) -> Vec<&Note> {
        self.list_where(query, |note| note.is_favorite)
    }

    /// Categories whose name contains `query`, case-insensitively.
    pub fn search_categories(&self, query: &str) -> Vec<&Category> {
        let needle = query.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|category| needle.is_empty() || category.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn note_count(&self, category_id: CategoryId) -> usize {
        self.notes
            .iter()
            .filter(|note| note.category_id == category_id)
            .count()
    }

    /// Empties both collections, persists that, then writes fresh sample data.
    pub fn clear_all(&mut self) -> StoreResult<()> {
        self.repo.save_collections(&[], &[])?;
        self.categories.clear();
        self.notes.clear();
        info!("event=store_clear module=service status=ok");
        self.seed_sample_data()
    }

    pub fn export_document(&self) -> ExportDocument {
        ExportDocument {
            categories: self.categories.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Both collections as indented JSON.
    pub fn export_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&self.export_document())
            .map_err(|err| StoreError::Repo(RepoError::Encode(err)))
    }

    fn seed_sample_data(&mut self) -> StoreResult<()> {
        let (categories, notes) = sample_data(self.clock.now_ms())?;
        self.repo.save_collections(&categories, &notes)?;
        self.categories = categories;
        self.notes = notes;
        info!(
            "event=store_seed module=service status=ok categories={} notes={}",
            self.categories.len(),
            self.notes.len()
        );
        Ok(())
    }

    fn list_where(&self, query: &str, keep: impl Fn(&Note) -> bool) -> Vec<&Note> {
        let mut listed: Vec<&Note> = self
            .notes
            .iter()
            .filter(|note| keep(note) && matches_query(&note.title, &note.content, query))
            .collect();
        listed.sort_by(|a, b| {
            b.is_pinned
                .cmp(&a.is_pinned)
                .then_with(|| b.updated_at.cmp(&a.updated_at))
        });
        listed
    }

    fn modify_note(
        &mut self,
        id: NoteId,
        change: impl FnOnce(&mut Note),
    ) -> StoreResult<Option<Note>> {
        let Some(index) = self.notes.iter().position(|note| note.id == id) else {
            return Ok(None);
        };
        let mut next = self.notes.clone();
        change(&mut next[index]);
        let updated = next[index].clone();
        self.commit_notes(next)?;
        Ok(Some(updated))
    }

    fn commit_categories(&mut self, next: Vec<Category>) -> StoreResult<()> {
        self.repo.save_categories(&next)?;
        self.categories = next;
        Ok(())
    }

    fn commit_notes(&mut self, next: Vec<Note>) -> StoreResult<()> {
        self.repo.save_notes(&next)?;
        self.notes = next;
        Ok(())
    }
}
