//! Light/dark preference, persisted under the `theme` key.

use crate::error::{AtlasError, Result};
use crate::store::{KeyValueStore, THEME_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
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

    pub fn toggled(self) -> Self {
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
    type Err = AtlasError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(AtlasError::Api(format!(
                "Unknown theme '{}', expected 'light' or 'dark'",
                other
            ))),
        }
    }
}

pub struct ThemeStore<S: KeyValueStore> {
    store: S,
    theme: Theme,
    stored: bool,
}

impl<S: KeyValueStore> ThemeStore<S> {
    /// Read the stored preference. Anything missing or unrecognized yields
    /// `fallback`; nothing is written until the theme changes.
    pub fn load(store: S, fallback: Theme) -> Self {
        let (theme, stored) = match store.get(THEME_KEY) {
            Ok(Some(raw)) => match raw.parse() {
                Ok(theme) => (theme, true),
                Err(_) => {
                    tracing::warn!(value = %raw, "ignoring unknown stored theme");
                    (fallback, false)
                }
            },
            Ok(None) => (fallback, false),
            Err(e) => {
                tracing::warn!(error = %e, "could not read theme, using fallback");
                (fallback, false)
            }
        };
        Self {
            store,
            theme,
            stored,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    /// The preference the user saved, if any. `None` while on the fallback.
    pub fn stored(&self) -> Option<Theme> {
        self.stored.then_some(self.theme)
    }

    pub fn set(&mut self, theme: Theme) -> Result<Theme> {
        self.store.set(THEME_KEY, theme.as_str())?;
        self.theme = theme;
        self.stored = true;
        Ok(theme)
    }

    pub fn toggle(&mut self) -> Result<Theme> {
        self.set(self.theme.toggled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_defaults_to_fallback_without_writing() {
        let backend = MemBackend::new();
        let themes = ThemeStore::load(&backend, Theme::Light);
        assert_eq!(themes.theme(), Theme::Light);
        assert!(!themes.is_dark());
        assert_eq!(themes.stored(), None);
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn test_loads_stored_dark() {
        let backend = MemBackend::new();
        backend.set(THEME_KEY, "dark").unwrap();
        let themes = ThemeStore::load(&backend, Theme::Light);
        assert!(themes.is_dark());
        assert_eq!(themes.stored(), Some(Theme::Dark));
    }

    #[test]
    fn test_unknown_value_uses_fallback() {
        let backend = MemBackend::new();
        backend.set(THEME_KEY, "solarized").unwrap();
        let themes = ThemeStore::load(&backend, Theme::Dark);
        assert_eq!(themes.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists_each_flip() {
        let backend = MemBackend::new();
        let mut themes = ThemeStore::load(&backend, Theme::Light);

        assert_eq!(themes.toggle().unwrap(), Theme::Dark);
        assert_eq!(backend.get(THEME_KEY).unwrap(), Some("dark".to_string()));

        assert_eq!(themes.toggle().unwrap(), Theme::Light);
        assert_eq!(backend.get(THEME_KEY).unwrap(), Some("light".to_string()));
    }

    #[test]
    fn test_failed_write_keeps_theme() {
        let backend = MemBackend::new();
        let mut themes = ThemeStore::load(&backend, Theme::Light);
        backend.set_simulate_write_error(true);
        assert!(themes.toggle().is_err());
        assert_eq!(themes.theme(), Theme::Light);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("blue".parse::<Theme>().is_err());
        assert_eq!(Theme::Dark.to_string(), "dark");
    }
}
