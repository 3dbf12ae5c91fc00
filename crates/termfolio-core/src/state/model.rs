//! Persisted visitor state.
//!
//! Only the theme, the point total and the Easter egg flag survive between
//! sessions. They are stored as plain strings under fixed keys so any
//! key/value backend can hold them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FolioError;

pub const THEME_KEY: &str = "theme";
pub const POINTS_KEY: &str = "points";
pub const EASTER_EGG_KEY: &str = "easterEggFound";

/// Color theme of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(FolioError::invalid_request(format!(
                "unknown theme '{}'",
                other
            ))),
        }
    }
}

/// State restored at session start and written back on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub theme: Theme,
    pub points: u32,
    pub easter_egg_found: bool,
}

impl PersistedState {
    /// Decodes stored entries. Absent keys take their defaults; a value that
    /// does not parse is reported through `on_invalid` and also defaulted.
    pub fn from_entries<F, W>(mut get: F, mut on_invalid: W) -> Self
    where
        F: FnMut(&str) -> Option<String>,
        W: FnMut(&str, &str),
    {
        let mut state = Self::default();

        if let Some(raw) = get(THEME_KEY) {
            match raw.parse() {
                Ok(theme) => state.theme = theme,
                Err(_) => on_invalid(THEME_KEY, &raw),
            }
        }
        if let Some(raw) = get(POINTS_KEY) {
            match raw.trim().parse::<u32>() {
                Ok(points) => state.points = points,
                Err(_) => on_invalid(POINTS_KEY, &raw),
            }
        }
        if let Some(raw) = get(EASTER_EGG_KEY) {
            match raw.as_str() {
                "true" => state.easter_egg_found = true,
                "false" => state.easter_egg_found = false,
                _ => on_invalid(EASTER_EGG_KEY, &raw),
            }
        }

        state
    }

    /// Encodes the state as `(key, value)` pairs.
    pub fn to_entries(&self) -> [(&'static str, String); 3] {
        [
            (THEME_KEY, self.theme.as_str().to_string()),
            (POINTS_KEY, self.points.to_string()),
            (EASTER_EGG_KEY, self.easter_egg_found.to_string()),
        ]
    }
}
