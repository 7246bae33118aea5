//! Deployment configuration generation.
//!
//! Renders `netlify.toml`, `.gitignore`, `.env.example` and
//! `requirements.txt`, and writes them into a project.

pub mod netlify_toml;
pub mod templates;
pub mod writer;

pub use netlify_toml::{render_netlify_toml, NetlifyTomlOptions, DEFAULT_PYTHON_VERSION};
pub use templates::{render_env_example, render_gitignore, render_requirements};
pub use writer::{ConfigWriter, WriteOutcome};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

fn default_true() -> bool {
    true
}

fn default_publish_dir() -> String {
    ".".to_string()
}

/// Which files to generate and with what values.
///
/// Field names match the studio's `/api/generate` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    #[serde(default = "default_publish_dir")]
    pub publish_dir: String,
    #[serde(default)]
    pub functions_dir: Option<String>,
    #[serde(default)]
    pub build_command: Option<String>,
    #[serde(default)]
    pub python_version: Option<String>,
    #[serde(default)]
    pub env_vars: Vec<String>,
    #[serde(default = "default_true")]
    pub netlify_toml: bool,
    #[serde(default = "default_true")]
    pub gitignore: bool,
    #[serde(default = "default_true")]
    pub env_example: bool,
    #[serde(default = "default_true")]
    pub requirements: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            publish_dir: default_publish_dir(),
            functions_dir: None,
            build_command: None,
            python_version: None,
            env_vars: Vec::new(),
            netlify_toml: true,
            gitignore: true,
            env_example: true,
            requirements: true,
        }
    }
}

impl GenerateOptions {
    fn functions_dir(&self) -> Option<&str> {
        self.functions_dir
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// Options for the `netlify.toml` renderer.
    pub fn toml_options(&self) -> NetlifyTomlOptions {
        NetlifyTomlOptions {
            publish_dir: self.publish_dir.clone(),
            functions_dir: self.functions_dir().map(String::from),
            build_command: self.build_command.clone(),
            python_version: self
                .python_version
                .clone()
                .unwrap_or_else(|| DEFAULT_PYTHON_VERSION.to_string()),
        }
    }
}

/// Result of generating one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    pub file: String,
    pub success: bool,
}

/// Generate every selected file under `root`.
///
/// `overwrite` controls whether existing files are replaced; skipped files
/// are reported with `success: false`. `.env.example` needs at least one
/// variable and `requirements.txt` needs a functions directory.
pub fn generate_files(
    root: &Path,
    opts: &GenerateOptions,
    overwrite: bool,
) -> Result<Vec<GeneratedFile>> {
    let writer = ConfigWriter::new(root);
    let mut planned: Vec<(String, String)> = Vec::new();

    if opts.netlify_toml {
        planned.push((
            "netlify.toml".to_string(),
            render_netlify_toml(&opts.toml_options()),
        ));
    }
    if opts.gitignore {
        planned.push((".gitignore".to_string(), render_gitignore()));
    }
    if opts.env_example && !opts.env_vars.is_empty() {
        planned.push((".env.example".to_string(), render_env_example(&opts.env_vars)));
    }
    if let Some(dir) = opts.functions_dir().filter(|_| opts.requirements) {
        planned.push((
            format!("{}/requirements.txt", dir.trim_end_matches('/')),
            render_requirements(&opts.env_vars),
        ));
    }

    let mut results = Vec::with_capacity(planned.len());
    for (file, content) in planned {
        let outcome = writer.write(&file, &content, overwrite)?;
        results.push(GeneratedFile {
            file,
            success: outcome == WriteOutcome::Written,
        });
    }
    Ok(results)
}
