//! User settings.
//!
//! Settings live in `~/.netlify-ai/config.yml` unless `--config` points
//! elsewhere. A missing file means defaults.
//!
//! # Example
//!
//! ```
//! use netlify_ai::config::{load_settings, validate, Settings};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! let path = temp.path().join("config.yml");
//! fs::write(&path, "server:\n  port: 8080\n").unwrap();
//!
//! let settings = load_settings(Some(&path)).unwrap();
//! validate(&settings).unwrap();
//! assert_eq!(settings.server.port, 8080);
//! assert_eq!(settings.build.python_version, "3.10");
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    default_settings_path, load_settings, load_settings_file, parse_settings, SETTINGS_DIR,
    SETTINGS_FILE,
};
pub use schema::{
    AiSettings, BuildSettings, ProviderSettings, ServerSettings, Settings, DEFAULT_HOST,
    DEFAULT_PORT,
};
pub use validator::validate;
