//! Configuration module for news-digest
//!
//! Settings come from an optional YAML file, then the process environment
//! (which the binary seeds from `.env`). Later sources win.

mod settings;

pub use settings::*;

use crate::error::ConfigError;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming an explicit settings file
pub const SETTINGS_PATH_VAR: &str = "DIGEST_SETTINGS_PATH";

/// Load settings from file (if any) and the environment, then validate them
pub fn load() -> Result<Settings, ConfigError> {
    let mut settings = match settings_file() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => Settings::default(),
    };
    settings.merge_env();
    settings.validate()?;

    Ok(settings)
}

/// Locate a settings file, checking the environment variable first
fn settings_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(SETTINGS_PATH_VAR) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    [PathBuf::from("digest.yml"), PathBuf::from("config/digest.yml")]
        .into_iter()
        .find(|p| p.exists())
}
