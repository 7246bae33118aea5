//! Settings validation.

use std::str::FromStr;

use crate::ai::Provider;
use crate::config::schema::Settings;
use crate::error::{DeployError, Result};

/// Validate loaded settings.
pub fn validate(settings: &Settings) -> Result<()> {
    if settings.server.port == 0 {
        return Err(DeployError::SettingsValidationError {
            message: "server.port must be between 1 and 65535".to_string(),
        });
    }

    if settings.server.host.trim().is_empty() {
        return Err(DeployError::SettingsValidationError {
            message: "server.host must not be empty".to_string(),
        });
    }

    if Provider::from_str(&settings.ai.provider).is_err() {
        return Err(DeployError::SettingsValidationError {
            message: format!(
                "ai.provider '{}' is not one of: openai, anthropic, google",
                settings.ai.provider
            ),
        });
    }

    Ok(())
}
