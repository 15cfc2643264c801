//! Core domain logic for DevNotes.
//! This crate is the single source of truth for business invariants.

pub mod app;
pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use app::{ActiveView, App, ColorSchemeSource, DeleteTarget, FixedColorScheme, UiEffect};
pub use clock::{Clock, ManualClock, SystemClock};
pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::category::{Category, CategoryColor, CategoryIcon, CategoryId};
pub use model::note::{Note, NoteDraft, NoteId};
pub use model::preferences::{ColorScheme, TextZoom, Theme};
pub use model::ValidationError;
pub use repo::kv_repo::{KvRepository, MemoryKvRepository, SqliteKvRepository};
pub use repo::{RepoError, RepoResult};
pub use service::note_store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
