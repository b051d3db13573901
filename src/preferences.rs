//! Display preferences
//!
//! The theme is persisted under [`THEME_KEY`] and only affects rendering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EatRateLoveError, Result};
use crate::storage::{LocalStorage, THEME_KEY};

/// Color theme for terminal output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = EatRateLoveError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(EatRateLoveError::Validation(format!(
                "Unknown theme: {} (expected dark or light)",
                other
            ))),
        }
    }
}

/// Reads and writes the persisted theme
#[derive(Debug, Clone)]
pub struct Preferences {
    storage: LocalStorage,
}

impl Preferences {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    /// Current theme. Missing or unreadable values fall back to dark.
    pub fn theme(&self) -> Theme {
        match self.storage.get(THEME_KEY) {
            Ok(Some(value)) => value.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unknown stored theme {:?}", value);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.storage.set(THEME_KEY, theme.as_str())
    }

    /// Flip the theme and persist it, returning the new value.
    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}
