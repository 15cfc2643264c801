//! Filesystem locations for the local store and logs.
//!
//! # Invariants
//! - Every resolved path is absolute.
//! - The log directory defaults to `<data dir>/logs`.

use std::io;
use std::path::{Path, PathBuf};

pub const DB_FILE_NAME: &str = "devnotes.sqlite3";
const APP_DIR_NAME: &str = "devnotes";
const FALLBACK_DIR_NAME: &str = ".devnotes";
const LOG_DIR_NAME: &str = "logs";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
}

impl Paths {
    /// Resolves directories from explicit overrides, then platform defaults.
    ///
    /// `data_dir` already carries the `DEVNOTES_DIR` fallback through clap.
    pub fn resolve(data_dir: Option<PathBuf>, log_dir: Option<PathBuf>) -> io::Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir(),
        };
        let data_dir = std::path::absolute(data_dir)?;
        let log_dir = match log_dir {
            Some(dir) => std::path::absolute(dir)?,
            None => data_dir.join(LOG_DIR_NAME),
        };
        Ok(Self {
            db_path: data_dir.join(DB_FILE_NAME),
            data_dir,
            log_dir,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_DIR_NAME))
}
