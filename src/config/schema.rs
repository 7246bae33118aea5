//! Settings schema.
//!
//! Structs mapping the YAML settings file. Every field has a default, so an
//! empty or partial file is valid.

use serde::{Deserialize, Serialize};

use crate::generate::DEFAULT_PYTHON_VERSION;

/// Loopback address the studio binds to by default.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the studio listens on by default.
pub const DEFAULT_PORT: u16 = 5886;

/// Root of the settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Local studio server.
    pub server: ServerSettings,

    /// Defaults for generated configuration.
    pub build: BuildSettings,

    /// AI assistant.
    pub ai: AiSettings,
}

/// Studio server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Open the default browser once the server is up.
    pub open_browser: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            open_browser: true,
        }
    }
}

impl ServerSettings {
    /// URL the studio is reachable at.
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Defaults for generated files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    pub python_version: String,
    pub publish_dir: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            python_version: DEFAULT_PYTHON_VERSION.to_string(),
            publish_dir: ".".to_string(),
        }
    }
}

/// AI assistant settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Provider used when none is given: openai, anthropic, google.
    pub provider: String,

    /// Language replies should be written in.
    pub response_language: String,

    pub openai: ProviderSettings,
    pub anthropic: ProviderSettings,
    pub google: ProviderSettings,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            response_language: "Traditional Chinese (繁體中文)".to_string(),
            openai: ProviderSettings::default(),
            anthropic: ProviderSettings::default(),
            google: ProviderSettings::default(),
        }
    }
}

/// Per-provider overrides. Unset fields fall back to the provider defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_studio_address() {
        let settings = Settings::default();
        assert_eq!(settings.server.url(), "http://127.0.0.1:5886");
        assert!(settings.server.open_browser);
        assert_eq!(settings.build.python_version, "3.10");
        assert_eq!(settings.ai.provider, "openai");
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings: Settings = serde_yaml::from_str("server:\n  port: 9000\n").unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, DEFAULT_HOST);
        assert_eq!(settings.build.publish_dir, ".");
    }

    #[test]
    fn provider_overrides_parse() {
        let yaml = "ai:\n  provider: google\n  google:\n    model: gemini-2.0-pro\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.ai.provider, "google");
        assert_eq!(settings.ai.google.model.as_deref(), Some("gemini-2.0-pro"));
        assert!(settings.ai.openai.model.is_none());
    }
}
