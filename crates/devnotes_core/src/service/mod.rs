//! Core use-case services.
//!
//! # Responsibility
//! - Own the in-memory collections and write them through to persistence.
//! - Track editor undo/redo history for one editing session.
//! - Produce the first-run sample dataset.

pub mod editor_session;
pub mod history;
pub mod note_store;
pub mod seed;
