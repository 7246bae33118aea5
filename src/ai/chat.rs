//! Request plumbing shared by the provider backends.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use crate::error::{DeployError, Result};

/// Upper bound on reply length, in tokens.
pub const MAX_TOKENS: u32 = 1000;

/// Sampling temperature for every provider.
pub const TEMPERATURE: f64 = 0.7;

/// Per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// One chat turn.
#[derive(Debug, Clone, Copy)]
pub struct ChatRequest<'a> {
    /// Instructions for the model.
    pub system: &'a str,
    /// Optional project description supplied by the caller.
    pub context: Option<&'a str>,
    /// The user's question.
    pub message: &'a str,
}

impl ChatRequest<'_> {
    /// Context line appended to the instructions, if any.
    pub fn context_line(&self) -> Option<String> {
        self.context
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(|c| format!("Project info: {}", c))
    }
}

/// Build the blocking HTTP client used for AI calls.
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("netlify-ai/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| DeployError::AiRequestFailed {
            message: format!("Failed to build HTTP client: {}", e),
        })
}

/// Send a request and decode a JSON reply.
///
/// Non-2xx answers become [`DeployError::AiApiError`] carrying the raw body.
pub(crate) fn send(request: RequestBuilder) -> Result<Value> {
    let response = request.send().map_err(|e| DeployError::AiRequestFailed {
        message: e.to_string(),
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(DeployError::AiApiError {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json::<Value>()
        .map_err(|e| DeployError::AiRequestFailed {
            message: format!("Invalid JSON reply: {}", e),
        })
}

/// Pull the reply text out of a decoded response.
pub(crate) fn reply_text(value: &Value, pointer: &str) -> Result<String> {
    value
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DeployError::AiRequestFailed {
            message: format!("Reply has no text at {}", pointer),
        })
}
