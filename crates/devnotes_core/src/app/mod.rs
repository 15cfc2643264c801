//! Application layer: view state, preferences and the event controller.
//!
//! # Responsibility
//! - Hold every piece of runtime state a front end renders from.
//! - Expose gesture-level operations that hosts (CLI shell, tests) drive.
//!
//! # Invariants
//! - Hosts never mutate the store directly; all changes go through [`App`].
//! - Timed follow-ups are described as [`UiEffect`] values, not executed here.

pub mod controller;
pub mod display;
pub mod preferences;
pub mod view_state;

pub use controller::{
    App, CategoryForm, NoteForm, UiEffect, CLEAR_ALL_WARNING, FAVORITES_NAVIGATION_DELAY_MS,
    FAVORITES_REFRESH_DELAY_MS,
};
pub use display::{format_timestamp, format_timestamp_in};
pub use preferences::{ColorSchemeSource, FixedColorScheme, Preferences};
pub use view_state::{ActiveView, DeleteTarget, OpenForm, ViewState};
