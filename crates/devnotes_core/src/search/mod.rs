//! Plain-text projection of rich-text markup for search and previews.
//!
//! # Invariants
//! - Markup is never modified; only derived strings are produced.
//! - Query matching is case-insensitive substring matching.

pub mod text;

pub use text::{matches_query, plain_text, preview_text, PREVIEW_MAX_CHARS};
