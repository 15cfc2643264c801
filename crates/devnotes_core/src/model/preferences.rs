//! Display preferences persisted next to the collections.

use crate::model::ValidationError;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Chosen color theme. Persisted as the literal choice, never the resolved one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(ValidationError::UnknownToken {
                kind: "theme",
                value: value.to_string(),
            }),
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Concrete scheme a theme renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScheme {
    Light,
    Dark,
}

/// Text zoom level for the note content view, always within `MIN..=MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TextZoom(u8);

impl TextZoom {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const DEFAULT: TextZoom = TextZoom(2);

    /// Builds a level, clamping out-of-range input into `MIN..=MAX`.
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    pub fn level(self) -> u8 {
        self.0
    }

    /// Next level up, or `None` when already at `MAX`.
    pub fn zoomed_in(self) -> Option<Self> {
        (self.0 < Self::MAX).then(|| Self(self.0 + 1))
    }

    /// Next level down, or `None` when already at `MIN`.
    pub fn zoomed_out(self) -> Option<Self> {
        (self.0 > Self::MIN).then(|| Self(self.0 - 1))
    }

    /// Style class applied to the note content view.
    pub fn css_class(self) -> String {
        format!("zoom-level-{}", self.0)
    }
}

impl Default for TextZoom {
    fn default() -> Self {
        Self::DEFAULT
    }
}
