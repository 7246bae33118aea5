//! Settings file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Settings;
use crate::config::validator::validate;
use crate::error::{DeployError, Result};

/// Directory under the home directory holding user settings.
pub const SETTINGS_DIR: &str = ".netlify-ai";

/// Settings file name.
pub const SETTINGS_FILE: &str = "config.yml";

/// Default settings location: `~/.netlify-ai/config.yml`.
pub fn default_settings_path() -> Option<PathBuf> {
    Some(dirs::home_dir()?.join(SETTINGS_DIR).join(SETTINGS_FILE))
}

/// Parse settings from YAML text.
///
/// Empty documents yield the defaults.
pub fn parse_settings(content: &str, path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| DeployError::SettingsParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate a settings file.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path)?;
    let settings = parse_settings(&content, path)?;
    validate(&settings)?;
    Ok(settings)
}

/// Load settings.
///
/// An explicit path must exist. Without one, the user settings file is used
/// when present and defaults otherwise.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings> {
    if let Some(path) = explicit {
        tracing::debug!("Loading settings from {}", path.display());
        return load_settings_file(path);
    }

    match default_settings_path() {
        Some(path) if path.exists() => {
            tracing::debug!("Loading settings from {}", path.display());
            load_settings_file(&path)
        }
        _ => {
            tracing::debug!("No settings file, using defaults");
            Ok(Settings::default())
        }
    }
}
