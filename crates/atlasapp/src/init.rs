//! # Data Directory Resolution
//!
//! Everything atlas persists (session, favorites, theme) and its optional
//! `atlas.toml` live in a single data directory, chosen in this order:
//!
//! 1. The explicit override passed to [`initialize`] (the CLI's `--data`).
//! 2. The `ATLAS_DATA` environment variable. Tests use this to isolate state.
//! 3. The OS data directory from the `directories` crate.

use crate::api::AtlasApi;
use crate::config::AtlasConfig;
use crate::error::{AtlasError, Result};
use crate::store::fs_backend::FsBackend;
use crate::theme::Theme;
use directories::ProjectDirs;
use std::path::PathBuf;

pub const DATA_ENV: &str = "ATLAS_DATA";

pub struct AtlasContext {
    pub api: AtlasApi<FsBackend>,
    pub data_dir: PathBuf,
    pub config: AtlasConfig,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "atlas", "atlas")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| AtlasError::Config("Could not determine a data directory".to_string()))
}

/// Resolve the data directory, load config, and build an initialized api.
///
/// `theme_fallback` is used until the user picks a theme.
pub fn initialize(data_override: Option<PathBuf>, theme_fallback: Theme) -> Result<AtlasContext> {
    let data_dir = resolve_data_dir(data_override)?;
    tracing::debug!(data_dir = %data_dir.display(), "initializing");

    let config = AtlasConfig::load(&data_dir)?;
    let backend = FsBackend::new(data_dir.clone());
    let mut api = AtlasApi::new(backend, config.clone(), theme_fallback)?;
    api.initialize();

    Ok(AtlasContext {
        api,
        data_dir,
        config,
    })
}
