//! Typed mapping of application state onto key-value entries.
//!
//! # Invariants
//! - Collections are JSON arrays; theme is its literal; zoom is a decimal string.
//! - Absent entries load as defaults.
//! - Malformed collection JSON loads as an empty collection and is logged.

use crate::model::category::Category;
use crate::model::note::Note;
use crate::model::preferences::{TextZoom, Theme};
use crate::repo::kv_repo::KvRepository;
use crate::repo::RepoResult;
use log::{error, warn};
use serde::de::DeserializeOwned;

pub const CATEGORIES_KEY: &str = "devnotes_categories";
pub const NOTES_KEY: &str = "devnotes_notes";
pub const THEME_KEY: &str = "devnotes_theme";
pub const TEXT_ZOOM_KEY: &str = "devnotes_text_zoom_level";

/// Persistence adapter used by the domain store and preferences.
#[derive(Debug, Clone)]
pub struct StateRepository<R: KvRepository> {
    kv: R,
}

impl<R: KvRepository> StateRepository<R> {
    pub fn new(kv: R) -> Self {
        Self { kv }
    }

    pub fn load_categories(&self) -> RepoResult<Vec<Category>> {
        Ok(self.load_json(CATEGORIES_KEY)?.unwrap_or_default())
    }

    pub fn load_notes(&self) -> RepoResult<Vec<Note>> {
        Ok(self.load_json(NOTES_KEY)?.unwrap_or_default())
    }

    pub fn save_categories(&self, categories: &[Category]) -> RepoResult<()> {
        self.kv
            .put(CATEGORIES_KEY, &serde_json::to_string(categories)?)
    }

    pub fn save_notes(&self, notes: &[Note]) -> RepoResult<()> {
        self.kv.put(NOTES_KEY, &serde_json::to_string(notes)?)
    }

    /// Writes both collections in one atomic batch.
    pub fn save_collections(&self, categories: &[Category], notes: &[Note]) -> RepoResult<()> {
        self.kv.put_many(&[
            (CATEGORIES_KEY, serde_json::to_string(categories)?),
            (NOTES_KEY, serde_json::to_string(notes)?),
        ])
    }

    /// Loads the chosen theme; unknown literals fall back to `Theme::System`.
    pub fn load_theme(&self) -> RepoResult<Theme> {
        let Some(raw) = self.kv.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        Ok(raw.parse().unwrap_or_else(|_| {
            warn!("event=state_load module=repo status=fallback key={THEME_KEY} reason=unknown_literal");
            Theme::default()
        }))
    }

    pub fn save_theme(&self, theme: Theme) -> RepoResult<()> {
        self.kv.put(THEME_KEY, theme.as_str())
    }

    /// Loads the zoom level; unparsable values use the default, others are clamped.
    pub fn load_text_zoom(&self) -> RepoResult<TextZoom> {
        let Some(raw) = self.kv.get(TEXT_ZOOM_KEY)? else {
            return Ok(TextZoom::default());
        };
        match raw.trim().parse::<i64>() {
            Ok(level) => Ok(TextZoom::clamped(level)),
            Err(_) => {
                warn!("event=state_load module=repo status=fallback key={TEXT_ZOOM_KEY} reason=not_an_integer");
                Ok(TextZoom::default())
            }
        }
    }

    pub fn save_text_zoom(&self, zoom: TextZoom) -> RepoResult<()> {
        self.kv.put(TEXT_ZOOM_KEY, &zoom.level().to_string())
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> RepoResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                error!(
                    "event=state_load module=repo status=error key={key} error_code=malformed_json line={} column={}",
                    err.line(),
                    err.column()
                );
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StateRepository, CATEGORIES_KEY, NOTES_KEY, TEXT_ZOOM_KEY, THEME_KEY};
    use crate::model::category::{Category, CategoryColor, CategoryIcon};
    use crate::model::preferences::{TextZoom, Theme};
    use crate::repo::kv_repo::{KvRepository, MemoryKvRepository};

    #[test]
    fn absent_entries_load_as_defaults() {
        let repo = StateRepository::new(MemoryKvRepository::new());
        assert!(repo.load_categories().unwrap().is_empty());
        assert!(repo.load_notes().unwrap().is_empty());
        assert_eq!(repo.load_theme().unwrap(), Theme::System);
        assert_eq!(repo.load_text_zoom().unwrap(), TextZoom::DEFAULT);
    }

    #[test]
    fn malformed_collections_fall_back_to_empty() {
        let kv = MemoryKvRepository::new();
        kv.put(CATEGORIES_KEY, "[{\"id\": ").unwrap();
        kv.put(NOTES_KEY, "not json").unwrap();
        let repo = StateRepository::new(kv);

        assert!(repo.load_categories().unwrap().is_empty());
        assert!(repo.load_notes().unwrap().is_empty());
    }

    #[test]
    fn preferences_tolerate_bad_values() {
        let kv = MemoryKvRepository::new();
        kv.put(THEME_KEY, "sepia").unwrap();
        kv.put(TEXT_ZOOM_KEY, "11").unwrap();
        let repo = StateRepository::new(kv.clone());
        assert_eq!(repo.load_theme().unwrap(), Theme::System);
        assert_eq!(repo.load_text_zoom().unwrap().level(), 5);

        kv.put(TEXT_ZOOM_KEY, "big").unwrap();
        assert_eq!(repo.load_text_zoom().unwrap(), TextZoom::DEFAULT);
    }

    #[test]
    fn preferences_are_stored_as_literals() {
        let kv = MemoryKvRepository::new();
        let repo = StateRepository::new(kv.clone());
        repo.save_theme(Theme::Dark).unwrap();
        repo.save_text_zoom(TextZoom::clamped(4)).unwrap();

        assert_eq!(kv.get(THEME_KEY).unwrap().as_deref(), Some("dark"));
        assert_eq!(kv.get(TEXT_ZOOM_KEY).unwrap().as_deref(), Some("4"));
    }

    #[test]
    fn collections_round_trip_exact_fields() {
        let repo = StateRepository::new(MemoryKvRepository::new());
        let category = Category::new("Ops", CategoryIcon::Cloud, CategoryColor::Teal, 99).unwrap();
        repo.save_collections(std::slice::from_ref(&category), &[])
            .unwrap();

        assert_eq!(repo.load_categories().unwrap(), vec![category]);
    }
}
