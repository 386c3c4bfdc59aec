//! # Configuration
//!
//! Settings are loaded with [`confique`] in priority order:
//! 1. **Environment variables**: `ATLAS_API_URL`, `ATLAS_BOUNDARY_URL`,
//!    `ATLAS_DEBOUNCE_MS`, `ATLAS_BOUNDARY_TIMEOUT_SECS`.
//! 2. **Config file**: `atlas.toml` in the data directory, if present.
//! 3. **Compiled defaults**.
//!
//! | Key | Default |
//! |-----|---------|
//! | `api_url` | `https://restcountries.com` |
//! | `boundary_url` | `https://raw.githubusercontent.com/johan/world.geo.json/master` |
//! | `debounce_ms` | `500` |
//! | `boundary_timeout_secs` | `10` |

use crate::error::{AtlasError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "atlas.toml";

pub const DEFAULT_API_URL: &str = "https://restcountries.com";
pub const DEFAULT_BOUNDARY_URL: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Base URL of the country record source.
    #[config(env = "ATLAS_API_URL", default = "https://restcountries.com")]
    pub api_url: String,

    /// Base URL of the GeoJSON boundary source.
    #[config(
        env = "ATLAS_BOUNDARY_URL",
        default = "https://raw.githubusercontent.com/johan/world.geo.json/master"
    )]
    pub boundary_url: String,

    /// Quiet period before a filter edit is applied, in milliseconds.
    #[config(env = "ATLAS_DEBOUNCE_MS", default = 500)]
    pub debounce_ms: u64,

    /// Upper bound for a whole boundary lookup, in seconds.
    #[config(env = "ATLAS_BOUNDARY_TIMEOUT_SECS", default = 10)]
    pub boundary_timeout_secs: u64,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            boundary_url: DEFAULT_BOUNDARY_URL.to_string(),
            debounce_ms: 500,
            boundary_timeout_secs: 10,
        }
    }
}

impl AtlasConfig {
    /// Load from the environment and `{dir}/atlas.toml`. A missing file is
    /// not an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        tracing::debug!(path = %path.display(), "loading config");
        AtlasConfig::builder()
            .env()
            .file(&path)
            .load()
            .map_err(|e| AtlasError::Config(e.to_string()))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn boundary_timeout(&self) -> Duration {
        Duration::from_secs(self.boundary_timeout_secs)
    }

    /// `(key, value)` pairs for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("api_url", self.api_url.clone()),
            ("boundary_url", self.boundary_url.clone()),
            ("debounce_ms", self.debounce_ms.to_string()),
            ("boundary_timeout_secs", self.boundary_timeout_secs.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = AtlasConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.debounce_delay(), Duration::from_millis(500));
        assert_eq!(config.boundary_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "boundary_url = \"http://localhost:9000\"\nboundary_timeout_secs = 3\n",
        )
        .unwrap();

        let config = AtlasConfig::load(dir.path()).unwrap();
        assert_eq!(config.boundary_url, "http://localhost:9000");
        assert_eq!(config.boundary_timeout_secs, 3);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "debounce_ms = \"soon\"\n").unwrap();

        let err = AtlasConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, AtlasError::Config(_)));
    }

    #[test]
    fn test_entries_lists_every_key() {
        let keys: Vec<&str> = AtlasConfig::default()
            .entries()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec!["api_url", "boundary_url", "debounce_ms", "boundary_timeout_secs"]
        );
    }
}
