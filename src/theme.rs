//! Theme preference persistence: a single key-value preference read on
//! startup and written on every toggle. An absent value means "follow the
//! system preference", re-evaluated live while absent.

use std::path::PathBuf;

use crate::error::{Result, SignError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

pub struct ThemeStore {
    path: PathBuf,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The saved preference, or `None` when the user has never toggled.
    pub fn load(&self) -> Result<Option<Theme>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let theme = serde_json::from_str(&raw)
            .map_err(|e| SignError::SerializationError(format!("Bad theme preference: {}", e)))?;
        Ok(Some(theme))
    }

    pub fn save(&self, theme: Theme) -> Result<()> {
        let raw = serde_json::to_string(&theme)
            .map_err(|e| SignError::SerializationError(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        log::debug!("Theme preference saved: {:?}", theme);
        Ok(())
    }

    /// Forget the saved preference and go back to following the system.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Saved preference wins; otherwise the current system theme applies.
    pub fn effective(&self, system: Theme) -> Result<Theme> {
        Ok(self.load()?.unwrap_or(system))
    }
}
