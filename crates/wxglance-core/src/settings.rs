//! Interface settings: language and theme, persisted on every change.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";

/// Interface language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
    Et,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Ru, Language::Et];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Et => "et",
        }
    }
}

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Light, Theme::Dark];

    pub fn code(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Returned when a language or theme code is not one we know.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported {kind} code: {code:?}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

impl FromStr for Language {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| UnknownCode {
                kind: "language",
                code: s.to_string(),
            })
    }
}

impl FromStr for Theme {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.code() == s)
            .ok_or_else(|| UnknownCode {
                kind: "theme",
                code: s.to_string(),
            })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The single settings value of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Settings {
    pub language: Language,
    pub theme: Theme,
}

/// Owns the current [`Settings`] and mirrors every change into storage.
pub struct SettingsStore<S: KeyValueStore> {
    settings: Settings,
    storage: S,
}

impl<S: KeyValueStore> SettingsStore<S> {
    /// Build the store from persisted values.
    ///
    /// Stored values override the defaults; missing keys keep them. Values
    /// that are not a known code are logged and ignored. Both current values
    /// are written back once loading is done.
    pub fn load(storage: S) -> Self {
        let mut settings = Settings::default();

        if let Some(raw) = storage.get(LANGUAGE_KEY) {
            match raw.parse::<Language>() {
                Ok(language) => settings.language = language,
                Err(e) => tracing::warn!("Ignoring stored language: {}", e),
            }
        }

        if let Some(raw) = storage.get(THEME_KEY) {
            match raw.parse::<Theme>() {
                Ok(theme) => settings.theme = theme,
                Err(e) => tracing::warn!("Ignoring stored theme: {}", e),
            }
        }

        tracing::info!(
            "Loaded settings: language={}, theme={}",
            settings.language,
            settings.theme
        );

        let mut store = Self { settings, storage };
        store.persist();
        store
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn language(&self) -> Language {
        self.settings.language
    }

    pub fn theme(&self) -> Theme {
        self.settings.theme
    }

    pub fn set_language(&mut self, language: Language) {
        self.settings.language = language;
        self.persist();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.settings.theme = theme;
        self.persist();
    }

    // Write failures keep the in-session value; they are only logged.
    fn persist(&mut self) {
        let Settings { language, theme } = self.settings;
        for (key, value) in [(LANGUAGE_KEY, language.code()), (THEME_KEY, theme.code())] {
            if let Err(e) = self.storage.set(key, value) {
                tracing::warn!("Failed to persist {}: {}", key, e);
            }
        }
    }
}
