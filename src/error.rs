//! [`DeployError`] and the crate-wide [`Result`].
//!
//! Commands turn the errors they expect into messages and exit codes;
//! whatever reaches `main` is printed as `Error: ...` with exit 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    /// Project path does not exist.
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Project path exists but is not a directory.
    #[error("Not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// Failed to parse the settings file.
    #[error("Failed to parse settings at {path}: {message}")]
    SettingsParseError { path: PathBuf, message: String },

    /// Invalid settings structure or values.
    #[error("Invalid settings: {message}")]
    SettingsValidationError { message: String },

    /// A program could not be started at all.
    #[error("Failed to start '{program}': {message}")]
    SpawnFailed { program: String, message: String },

    /// External command failed.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// A required tool is missing from PATH.
    #[error("Missing requirement '{requirement}': {message}")]
    RequirementMissing {
        requirement: String,
        message: String,
    },

    /// The AI provider name is not recognised.
    #[error("Unsupported AI provider: {name}")]
    UnknownProvider { name: String },

    /// The AI provider answered with a non-success status.
    #[error("API error: {status} - {body}")]
    AiApiError { status: u16, body: String },

    /// The AI request could not be sent or the reply had an unexpected shape.
    #[error("AI request failed: {message}")]
    AiRequestFailed { message: String },

    /// No API key was given or configured for a provider.
    #[error("No API key for {provider}: pass one or set {env_var}")]
    MissingApiKey { provider: String, env_var: String },

    /// Input rejected before any work was done.
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// A prompt was cancelled by the user (Ctrl+C / Esc).
    #[error("Cancelled by user")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, DeployError>;
