//! Category record and its icon/color vocabularies.

use crate::model::{non_blank, ValidationError};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

pub type CategoryId = Uuid;

/// Icon shown next to a category. Serialized as its icon-font token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryIcon {
    #[serde(rename = "ri-terminal-box-line")]
    Terminal,
    #[serde(rename = "ri-layout-2-line")]
    Layout,
    #[serde(rename = "ri-database-2-line")]
    Database,
    #[serde(rename = "ri-server-line")]
    Server,
    #[serde(rename = "ri-code-box-line")]
    Code,
    #[serde(rename = "ri-shield-keyhole-line")]
    Shield,
    #[serde(rename = "ri-cloud-line")]
    Cloud,
    #[serde(rename = "ri-settings-4-line")]
    Settings,
    #[serde(rename = "ri-file-list-line")]
    FileList,
    #[serde(rename = "ri-folder-line")]
    Folder,
}

impl CategoryIcon {
    /// Every icon in picker order. The first one is the form default.
    pub const ALL: [CategoryIcon; 10] = [
        Self::Terminal,
        Self::Layout,
        Self::Database,
        Self::Server,
        Self::Code,
        Self::Shield,
        Self::Cloud,
        Self::Settings,
        Self::FileList,
        Self::Folder,
    ];

    pub fn token(self) -> &'static str {
        match self {
            Self::Terminal => "ri-terminal-box-line",
            Self::Layout => "ri-layout-2-line",
            Self::Database => "ri-database-2-line",
            Self::Server => "ri-server-line",
            Self::Code => "ri-code-box-line",
            Self::Shield => "ri-shield-keyhole-line",
            Self::Cloud => "ri-cloud-line",
            Self::Settings => "ri-settings-4-line",
            Self::FileList => "ri-file-list-line",
            Self::Folder => "ri-folder-line",
        }
    }

    /// Short name accepted on the command line (`terminal`, `layout`, ...).
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Terminal => "terminal",
            Self::Layout => "layout",
            Self::Database => "database",
            Self::Server => "server",
            Self::Code => "code",
            Self::Shield => "shield",
            Self::Cloud => "cloud",
            Self::Settings => "settings",
            Self::FileList => "file-list",
            Self::Folder => "folder",
        }
    }
}

impl FromStr for CategoryIcon {
    type Err = ValidationError;

    /// Accepts either the full token or the short name, case-insensitively.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|icon| icon.token() == needle || icon.short_name() == needle)
            .ok_or_else(|| ValidationError::UnknownToken {
                kind: "icon",
                value: value.to_string(),
            })
    }
}

impl Display for CategoryIcon {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.token())
    }
}

/// Accent color of a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryColor {
    Green,
    Blue,
    Purple,
    Orange,
    Red,
    Teal,
    Gray,
}

impl CategoryColor {
    /// Every color in picker order. The first one is the form default.
    pub const ALL: [CategoryColor; 7] = [
        Self::Green,
        Self::Blue,
        Self::Purple,
        Self::Orange,
        Self::Red,
        Self::Teal,
        Self::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Red => "red",
            Self::Teal => "teal",
            Self::Gray => "gray",
        }
    }
}

impl FromStr for CategoryColor {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.name() == needle)
            .ok_or_else(|| ValidationError::UnknownToken {
                kind: "color",
                value: value.to_string(),
            })
    }
}

impl Display for CategoryColor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// User-defined grouping for notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// Display name, stored trimmed and never blank.
    pub name: String,
    pub icon: CategoryIcon,
    pub color: CategoryColor,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Category {
    /// Builds a category with a fresh id and both timestamps set to `now_ms`.
    ///
    /// # Errors
    /// - `ValidationError::BlankCategoryName` when `name` trims to nothing.
    pub fn new(
        name: &str,
        icon: CategoryIcon,
        color: CategoryColor,
        now_ms: i64,
    ) -> Result<Self, ValidationError> {
        let name = non_blank(name, ValidationError::BlankCategoryName)?;
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            icon,
            color,
            created_at: now_ms,
            updated_at: now_ms,
        })
    }
}
