//! Application controller: the explicit state container behind every screen.
//!
//! # Responsibility
//! - Own the domain store, preferences, view state and editing session.
//! - Translate UI gestures into store operations and view-state changes.
//! - Queue UI effects (notifications, delayed navigation) for the host.
//!
//! # Invariants
//! - Every successful mutation queues exactly one toast, except pin toggles.
//! - Validation failures leave state untouched, keep the form open and queue
//!   nothing.
//! - Navigating to the categories view clears the active category.

use crate::app::preferences::{ColorSchemeSource, Preferences};
use crate::app::view_state::{ActiveView, DeleteTarget, OpenForm, ViewState};
use crate::clock::Clock;
use crate::model::category::{Category, CategoryColor, CategoryIcon, CategoryId};
use crate::model::note::{Note, NoteDraft, NoteId};
use crate::model::preferences::{ColorScheme, TextZoom, Theme};
use crate::repo::kv_repo::KvRepository;
use crate::repo::state_repo::StateRepository;
use crate::service::editor_session::EditorSession;
use crate::service::note_store::{NoteStore, StoreError, StoreResult};
use log::debug;
use std::rc::Rc;

/// Delay before switching to favorites after favoriting a note.
pub const FAVORITES_NAVIGATION_DELAY_MS: u64 = 300;
/// Delay before re-rendering favorites after unfavoriting from that view.
pub const FAVORITES_REFRESH_DELAY_MS: u64 = 100;

/// Confirmation text for clear-all.
pub const CLEAR_ALL_WARNING: &str =
    "Are you sure you want to clear all data? This action cannot be undone.";

/// Side effect the host applies after an event handler returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Transient, non-blocking notification.
    Toast(String),
    /// Switch to `view` once `after_ms` has elapsed.
    Navigate { view: ActiveView, after_ms: u64 },
    /// Re-render the current view once `after_ms` has elapsed.
    Refresh { after_ms: u64 },
}

/// Category form fields; `None` means no selection was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryForm {
    pub name: String,
    pub icon: Option<CategoryIcon>,
    pub color: Option<CategoryColor>,
}

/// Note form fields. Content lives in the editor session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub is_pinned: bool,
}

pub struct App<R: KvRepository> {
    store: NoteStore<R>,
    preferences: Preferences<R>,
    view: ViewState,
    editor: Option<EditorSession>,
    effects: Vec<UiEffect>,
}

impl<R: KvRepository + Clone> App<R> {
    /// Loads state from `kv`; writes sample data on first run.
    pub fn open(
        kv: R,
        clock: Rc<dyn Clock>,
        scheme_source: Box<dyn ColorSchemeSource>,
    ) -> StoreResult<Self> {
        let store = NoteStore::open(StateRepository::new(kv.clone()), clock)?;
        let preferences = Preferences::load(StateRepository::new(kv), scheme_source)?;
        Ok(Self {
            store,
            preferences,
            view: ViewState::default(),
            editor: None,
            effects: Vec::new(),
        })
    }
}

impl<R: KvRepository> App<R> {
    pub fn store(&self) -> &NoteStore<R> {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Takes every queued effect, oldest first.
    pub fn drain_effects(&mut self) -> Vec<UiEffect> {
        std::mem::take(&mut self.effects)
    }

    // Navigation and search.

    /// Switches screens. Returns `false` for a notes view of an unknown category.
    pub fn navigate(&mut self, view: ActiveView) -> bool {
        if let ActiveView::Notes(id) = view {
            if self.store.category(id).is_none() {
                return false;
            }
        }
        if view != ActiveView::Settings {
            self.view.search_query.clear();
        }
        self.view.active_view = view;
        debug!("event=navigate module=app status=ok view={}", view.name());
        true
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.search_query = query.into();
    }

    pub fn active_category(&self) -> Option<&Category> {
        self.view
            .active_category()
            .and_then(|id| self.store.category(id))
    }

    /// Categories grid content for the current search query.
    pub fn visible_categories(&self) -> Vec<&Category> {
        match self.view.active_view {
            ActiveView::Categories => self.store.search_categories(&self.view.search_query),
            _ => self.store.categories().iter().collect(),
        }
    }

    /// Notes grid content for the active view and search query.
    pub fn visible_notes(&self) -> Vec<&Note> {
        match self.view.active_view {
            ActiveView::Notes(id) => self.store.list_by_category(id, &self.view.search_query),
            ActiveView::Favorites => self.store.list_favorites(&self.view.search_query),
            ActiveView::Categories | ActiveView::Settings => Vec::new(),
        }
    }

    // Category form.

    /// Opens the category form, prefilled when editing.
    ///
    /// Returns `None` when `editing` names an unknown category.
    pub fn open_category_form(&mut self, editing: Option<CategoryId>) -> Option<CategoryForm> {
        let form = match editing {
            Some(id) => {
                let category = self.store.category(id)?;
                CategoryForm {
                    name: category.name.clone(),
                    icon: Some(category.icon),
                    color: Some(category.color),
                }
            }
            None => CategoryForm {
                name: String::new(),
                icon: Some(CategoryIcon::ALL[0]),
                color: Some(CategoryColor::ALL[0]),
            },
        };
        self.view.open_form = Some(OpenForm::Category(editing));
        Some(form)
    }

    /// Saves the open category form. Returns whether the form closed.
    pub fn submit_category_form(&mut self, form: &CategoryForm) -> StoreResult<bool> {
        let Some(OpenForm::Category(editing)) = self.view.open_form else {
            return Ok(false);
        };
        let (Some(icon), Some(color)) = (form.icon, form.color) else {
            debug!("event=category_submit module=app status=skip reason=missing_selection");
            return Ok(false);
        };

        let saved = match editing {
            Some(id) => self
                .store
                .update_category(id, &form.name, icon, color)
                .map(|updated| updated.map(|_| "Category updated successfully")),
            None => self
                .store
                .create_category(&form.name, icon, color)
                .map(|_| Some("Category created successfully")),
        };
        let Some(outcome) = skip_invalid(saved, "category_submit")? else {
            return Ok(false);
        };

        if let Some(message) = outcome {
            self.toast(message);
        }
        self.view.open_form = None;
        Ok(true)
    }

    pub fn cancel_form(&mut self) {
        self.view.open_form = None;
        self.editor = None;
    }

    // Note form and editor.

    /// Opens the note form with a fresh editing session.
    ///
    /// Creating requires an active category; editing requires a known note.
    pub fn open_note_form(&mut self, editing: Option<NoteId>) -> Option<NoteForm> {
        let (form, session) = match editing {
            Some(id) => {
                let note = self.store.note(id)?;
                (
                    NoteForm {
                        title: note.title.clone(),
                        is_pinned: note.is_pinned,
                    },
                    EditorSession::editing(note.content.clone()),
                )
            }
            None => {
                self.view.active_category()?;
                (NoteForm::default(), EditorSession::blank())
            }
        };
        self.view.open_form = Some(OpenForm::Note(editing));
        self.editor = Some(session);
        Some(form)
    }

    pub fn editor(&self) -> Option<&EditorSession> {
        self.editor.as_ref()
    }

    /// Raw text input into the editor; snapshots after the debounce window.
    pub fn editor_input(&mut self, content: impl Into<String>) {
        let now_ms = self.store.now_ms();
        if let Some(editor) = self.editor.as_mut() {
            editor.input(content, now_ms);
        }
    }

    /// Fires a due debounce snapshot. Returns whether one was recorded.
    pub fn editor_tick(&mut self) -> bool {
        let now_ms = self.store.now_ms();
        self.editor
            .as_mut()
            .is_some_and(|editor| editor.tick(now_ms))
    }

    /// Applies markup produced by a formatting command.
    pub fn editor_format(&mut self, content: impl Into<String>) {
        if let Some(editor) = self.editor.as_mut() {
            editor.apply_format(content);
        }
    }

    pub fn editor_undo(&mut self) -> Option<String> {
        self.editor.as_mut()?.undo().map(str::to_string)
    }

    pub fn editor_redo(&mut self) -> Option<String> {
        self.editor.as_mut()?.redo().map(str::to_string)
    }

    /// Saves the open note form. Returns whether the form closed.
    pub fn submit_note_form(&mut self, form: &NoteForm) -> StoreResult<bool> {
        let Some(OpenForm::Note(editing)) = self.view.open_form else {
            return Ok(false);
        };
        let content = match self.editor.as_mut() {
            Some(editor) => {
                editor.flush();
                editor.content().to_string()
            }
            None => String::new(),
        };
        let draft = NoteDraft::new(form.title.clone(), content).pinned(form.is_pinned);

        let saved = match editing {
            Some(id) => {
                let is_favorite = self.store.note(id).map(|note| note.is_favorite);
                match is_favorite {
                    Some(is_favorite) => self
                        .store
                        .update_note(id, draft.favorite(is_favorite))
                        .map(|updated| updated.map(|_| "Note updated successfully")),
                    None => Ok(None),
                }
            }
            None => {
                let Some(category_id) = self.view.active_category() else {
                    debug!("event=note_submit module=app status=skip reason=no_active_category");
                    return Ok(false);
                };
                self.store
                    .create_note(category_id, draft.favorite(false))
                    .map(|_| Some("Note saved successfully"))
            }
        };
        let Some(outcome) = skip_invalid(saved, "note_submit")? else {
            return Ok(false);
        };

        if let Some(message) = outcome {
            self.toast(message);
        }
        self.view.open_form = None;
        self.editor = None;
        Ok(true)
    }

    // Note actions.

    /// Opens the read-only view of a note.
    pub fn view_note(&mut self, id: NoteId) -> Option<&Note> {
        let note = self.store.note(id)?;
        self.view.active_note = Some(note.id);
        Some(note)
    }

    pub fn close_note_view(&mut self) {
        self.view.active_note = None;
    }

    pub fn active_note(&self) -> Option<&Note> {
        self.view.active_note.and_then(|id| self.store.note(id))
    }

    pub fn toggle_pin(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        self.store.toggle_pin(id)
    }

    /// Flips the favorite flag and schedules the favorites-view follow-up.
    pub fn toggle_favorite(&mut self, id: NoteId) -> StoreResult<Option<Note>> {
        let Some(note) = self.store.toggle_favorite(id)? else {
            return Ok(None);
        };
        let in_favorites = self.view.active_view == ActiveView::Favorites;
        if note.is_favorite {
            self.toast("Note added to favorites");
            if !in_favorites {
                self.view.active_note = None;
                self.view.open_form = None;
                self.editor = None;
                self.effects.push(UiEffect::Navigate {
                    view: ActiveView::Favorites,
                    after_ms: FAVORITES_NAVIGATION_DELAY_MS,
                });
            }
        } else {
            self.toast("Note removed from favorites");
            if in_favorites {
                self.effects.push(UiEffect::Refresh {
                    after_ms: FAVORITES_REFRESH_DELAY_MS,
                });
            }
        }
        Ok(Some(note))
    }

    // Delete flow.

    /// First step: select the target. Returns the confirmation text.
    pub fn request_delete(&mut self, target: DeleteTarget) -> Option<&'static str> {
        let exists = match target {
            DeleteTarget::Category(id) => self.store.category(id).is_some(),
            DeleteTarget::Note(id) => self.store.note(id).is_some(),
        };
        if !exists {
            return None;
        }
        self.view.pending_delete = Some(target);
        Some(target.warning())
    }

    /// Second step: delete the pending target. Returns whether anything was removed.
    pub fn confirm_delete(&mut self) -> StoreResult<bool> {
        let Some(target) = self.view.pending_delete.take() else {
            return Ok(false);
        };
        match target {
            DeleteTarget::Category(id) => {
                let Some(removal) = self.store.delete_category(id)? else {
                    return Ok(false);
                };
                if self.view.active_category() == Some(id) {
                    self.navigate(ActiveView::Categories);
                }
                if let Some(active) = self.view.active_note {
                    if removal.removed_notes.iter().any(|note| note.id == active) {
                        self.view.active_note = None;
                    }
                }
                self.toast("Category deleted successfully");
            }
            DeleteTarget::Note(id) => {
                if self.store.delete_note(id)?.is_none() {
                    return Ok(false);
                }
                if self.view.active_note == Some(id) {
                    self.view.active_note = None;
                }
                self.toast("Note deleted successfully");
            }
        }
        Ok(true)
    }

    pub fn cancel_delete(&mut self) {
        self.view.pending_delete = None;
    }

    // Settings.

    pub fn theme(&self) -> Theme {
        self.preferences.theme()
    }

    pub fn resolved_scheme(&self) -> ColorScheme {
        self.preferences.resolved_scheme()
    }

    pub fn set_theme(&mut self, theme: Theme) -> StoreResult<()> {
        Ok(self.preferences.set_theme(theme)?)
    }

    pub fn toggle_theme(&mut self) -> StoreResult<Theme> {
        Ok(self.preferences.toggle_theme()?)
    }

    pub fn text_zoom(&self) -> TextZoom {
        self.preferences.text_zoom()
    }

    pub fn zoom_in(&mut self) -> StoreResult<Option<TextZoom>> {
        let zoom = self.preferences.zoom_in()?;
        self.toast_zoom(zoom);
        Ok(zoom)
    }

    pub fn zoom_out(&mut self) -> StoreResult<Option<TextZoom>> {
        let zoom = self.preferences.zoom_out()?;
        self.toast_zoom(zoom);
        Ok(zoom)
    }

    /// Serializes both collections for download.
    pub fn export_json(&mut self) -> StoreResult<String> {
        let json = self.store.export_json()?;
        self.toast("Data exported successfully");
        Ok(json)
    }

    /// Wipes and reseeds all data. Does nothing unless `confirmed`.
    pub fn clear_all(&mut self, confirmed: bool) -> StoreResult<bool> {
        if !confirmed {
            return Ok(false);
        }
        self.store.clear_all()?;
        self.view.active_note = None;
        self.view.pending_delete = None;
        self.view.open_form = None;
        self.editor = None;
        self.toast("All data cleared and reset to default");
        self.navigate(ActiveView::Categories);
        Ok(true)
    }

    fn toast_zoom(&mut self, zoom: Option<TextZoom>) {
        if let Some(zoom) = zoom {
            self.toast(format!("Text zoom: {} of {}", zoom.level(), TextZoom::MAX));
        }
    }

    fn toast(&mut self, message: impl Into<String>) {
        self.effects.push(UiEffect::Toast(message.into()));
    }
}

/// Turns validation failures into `Ok(None)` so forms stay open silently.
fn skip_invalid<T>(result: StoreResult<T>, event: &str) -> StoreResult<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(StoreError::Validation(err)) => {
            debug!("event={event} module=app status=skip reason=validation error={err}");
            Ok(None)
        }
        Err(err) => Err(err),
    }
}
