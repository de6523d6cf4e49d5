//! User preferences kept next to the game state

use serde::{Deserialize, Serialize};

use crate::store::{keys, KvStore, Persistence};

/// Colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("Unknown theme: {other}")),
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Load the saved theme; anything unrecognised means light
pub fn load_theme<S: KvStore>(persistence: &Persistence<S>) -> Theme {
    // stored bare ("dark"), not JSON-quoted
    match persistence.store().get(keys::THEME) {
        Ok(Some(raw)) => raw.trim().trim_matches('"').parse().unwrap_or_default(),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!("Failed to read theme: {}", e);
            Theme::default()
        }
    }
}

pub fn save_theme<S: KvStore>(persistence: &Persistence<S>, theme: Theme) {
    if let Err(e) = persistence.store().set(keys::THEME, theme.as_str()) {
        tracing::warn!("Failed to save theme: {}", e);
    }
}

/// Decorative chapter progress shown on the dashboard, 0..=100
pub fn chapter_progress<S: KvStore>(persistence: &Persistence<S>) -> u8 {
    persistence
        .load::<u8>(keys::CHAPTER_PROGRESS)
        .unwrap_or(0)
        .min(100)
}

pub fn set_chapter_progress<S: KvStore>(persistence: &Persistence<S>, percent: u8) {
    persistence.save(keys::CHAPTER_PROGRESS, &percent.min(100));
}
