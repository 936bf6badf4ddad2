//! Light/dark theme preference.
//!
//! The only thing the page persists: a single `theme` key whose value is
//! `"light"` or `"dark"`, stored as a small JSON object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown theme '{0}' (expected 'light' or 'dark')")]
    Unknown(String),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Body class applied to the page for this theme.
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Light => None,
            Self::Dark => Some("dark-theme"),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ThemeError::Unknown(other.to_string())),
        }
    }
}

/// Raw stored form. Kept as a string so an unexpected value degrades to the
/// default instead of failing the load.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    theme: String,
}

/// File-backed theme preference.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    path: PathBuf,
    default: Theme,
}

impl ThemeStore {
    pub fn new(path: impl Into<PathBuf>, default: Theme) -> Self {
        Self {
            path: path.into(),
            default,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The stored theme, or the default when nothing usable is stored.
    pub fn load(&self) -> Result<Theme, ThemeError> {
        if !self.path.exists() {
            return Ok(self.default);
        }
        let content = fs::read_to_string(&self.path)?;
        let stored: StoredPreference = match serde_json::from_str(&content) {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!(error = %err, path = %self.path.display(), "ignoring unreadable theme preference");
                return Ok(self.default);
            }
        };
        Ok(stored.theme.parse().unwrap_or(self.default))
    }

    pub fn save(&self, theme: Theme) -> Result<(), ThemeError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&StoredPreference {
            theme: theme.as_str().to_string(),
        })?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Flip the stored theme and persist it.
    pub fn toggle(&self) -> Result<Theme, ThemeError> {
        let theme = self.load()?.toggled();
        self.save(theme)?;
        tracing::info!(%theme, "theme toggled");
        Ok(theme)
    }
}
