//! Project analyser.
//!
//! Scans a project directory and classifies it so the generator and the
//! wizard can offer sensible defaults.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DeployError, Result};

use super::env_vars::detect_env_vars;
use super::scan::scan_files;
use super::types::{ExistingBuildConfig, ProjectAnalysis, ProjectType};

/// Build command suggested for projects with a root `package.json`.
pub const NODE_BUILD_COMMAND: &str = "npm run build";

/// Analyses a single project directory.
#[derive(Debug, Clone)]
pub struct ProjectAnalyzer {
    root: PathBuf,
    files: Vec<String>,
}

impl ProjectAnalyzer {
    /// Create an analyser for `path`.
    ///
    /// The path is resolved to an absolute, canonical directory.
    pub fn new(path: &Path) -> Result<Self> {
        let root = resolve_project_dir(path)?;
        Ok(Self {
            root,
            files: Vec::new(),
        })
    }

    /// The resolved project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Files found by the last [`analyze`](Self::analyze) call.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Scan the project and classify it.
    pub fn analyze(&mut self) -> ProjectAnalysis {
        self.files = scan_files(&self.root);
        tracing::debug!("Scanned {} files under {}", self.files.len(), self.root.display());

        let mut analysis = classify(&self.root.to_string_lossy(), &self.files);
        analysis.env_vars_needed = detect_env_vars(&self.root, &self.files);

        if analysis.has_netlify_config {
            analysis.existing_config = read_existing_config(&self.root.join("netlify.toml"));
        }

        analysis
    }
}

/// Resolve and validate a project directory.
pub fn resolve_project_dir(path: &Path) -> Result<PathBuf> {
    if !path.exists() {
        let shown = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        return Err(DeployError::PathNotFound { path: shown });
    }
    let root = path.canonicalize()?;
    if !root.is_dir() {
        return Err(DeployError::NotADirectory { path: root });
    }
    Ok(root)
}

/// Derive flags and the project type from a list of relative file paths.
pub fn classify(root: &str, files: &[String]) -> ProjectAnalysis {
    let mut analysis = ProjectAnalysis::empty(root);
    analysis.file_count = files.len();

    for file in files {
        let lower = file.to_lowercase();

        if lower.ends_with(".html") {
            analysis.has_html = true;
        }
        if lower.ends_with(".py") {
            analysis.has_python = true;
            analysis.python_files.push(file.clone());
        }

        match lower.as_str() {
            "package.json" => {
                analysis.has_node = true;
                analysis.has_package_json = true;
            }
            "netlify.toml" => analysis.has_netlify_config = true,
            ".env" => analysis.has_env_file = true,
            ".env.example" => analysis.has_env_example = true,
            ".gitignore" => analysis.has_gitignore = true,
            "requirements.txt" => analysis.has_requirements = true,
            _ => {}
        }
    }

    if analysis.has_python {
        let function_file = analysis.python_files.iter().find(|f| {
            let lower = f.to_lowercase();
            lower.contains("functions") || lower.contains("netlify")
        });

        if let Some(file) = function_file {
            analysis.functions_dir = functions_dir_of(file);
        }
        analysis.set_type(ProjectType::PythonFunctions);
    }

    if analysis.has_package_json {
        analysis.set_type(ProjectType::NodeProject);
        analysis.build_command = Some(NODE_BUILD_COMMAND.to_string());
    }

    analysis
}

/// Path prefix up to the first component mentioning "functions".
fn functions_dir_of(file: &str) -> Option<String> {
    let parts: Vec<&str> = file.split('/').collect();
    parts
        .iter()
        .position(|p| p.to_lowercase().contains("functions"))
        .map(|i| parts[..=i].join("/"))
}

#[derive(serde::Deserialize)]
struct NetlifyToml {
    build: Option<ExistingBuildConfig>,
}

/// Read the `[build]` table of an existing `netlify.toml`.
pub fn read_existing_config(path: &Path) -> Option<ExistingBuildConfig> {
    let content = fs::read_to_string(path).ok()?;
    match toml::from_str::<NetlifyToml>(&content) {
        Ok(parsed) => parsed.build,
        Err(e) => {
            tracing::warn!("Ignoring unparsable {}: {}", path.display(), e);
            None
        }
    }
}
