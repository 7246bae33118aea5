//! netlify-ai - a smart deployment assistant for Netlify.
//!
//! Point it at a project folder: it works out what kind of site the folder
//! holds, writes a matching `netlify.toml` (plus `.gitignore`, `.env.example`
//! and a functions `requirements.txt` when useful), and drives the `netlify`
//! CLI through login, site setup and preview/production deploys. A local web
//! studio exposes the same operations over a small JSON API, next to an AI
//! chat panel backed by OpenAI, Anthropic or Google Gemini.
//!
//! # Modules
//!
//! - [`ai`] - AI provider clients and the deployment assistant
//! - [`analysis`] - Project scanning and classification
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading and validation
//! - [`error`] - Error types and result aliases
//! - [`generate`] - netlify.toml and companion file generation
//! - [`netlify`] - Driver for the `netlify` CLI
//! - [`requirements`] - External tool probing
//! - [`secrets`] - Secret detection and output masking
//! - [`server`] - Local web studio
//! - [`shell`] - Process execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use netlify_ai::generate::{render_netlify_toml, NetlifyTomlOptions};
//!
//! let toml = render_netlify_toml(&NetlifyTomlOptions {
//!     publish_dir: "public".to_string(),
//!     ..Default::default()
//! });
//! assert!(toml.contains("publish = \"public\""));
//! ```

pub mod ai;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod netlify;
pub mod requirements;
pub mod secrets;
pub mod server;
pub mod shell;
pub mod ui;

pub use error::{DeployError, Result};
