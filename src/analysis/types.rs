//! Analysis result types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of project found at the analysed path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    /// Plain HTML/CSS/JS site.
    #[default]
    Static,
    /// Site with Python serverless functions.
    PythonFunctions,
    /// Node.js project with a build step.
    NodeProject,
}

impl ProjectType {
    /// Stable identifier, as used in JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::PythonFunctions => "python-functions",
            Self::NodeProject => "node-project",
        }
    }

    /// Human readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Static => "Static site (HTML/CSS/JS)",
            Self::PythonFunctions => "Python Serverless Functions",
            Self::NodeProject => "Node.js project",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[build]` values read from an existing `netlify.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistingBuildConfig {
    pub publish: Option<String>,
    pub functions: Option<String>,
    pub command: Option<String>,
}

/// Everything the analyser learned about a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub type_name: String,
    pub has_html: bool,
    pub has_python: bool,
    pub has_node: bool,
    pub has_netlify_config: bool,
    pub has_env_file: bool,
    pub has_env_example: bool,
    pub has_gitignore: bool,
    pub has_requirements: bool,
    pub has_package_json: bool,
    pub python_files: Vec<String>,
    pub env_vars_needed: Vec<String>,
    pub publish_dir: String,
    pub functions_dir: Option<String>,
    pub build_command: Option<String>,
    pub file_count: usize,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_config: Option<ExistingBuildConfig>,
}

impl ProjectAnalysis {
    /// An empty analysis for the given root, before any file was inspected.
    pub fn empty(path: &str) -> Self {
        Self {
            project_type: ProjectType::Static,
            type_name: ProjectType::Static.display_name().to_string(),
            has_html: false,
            has_python: false,
            has_node: false,
            has_netlify_config: false,
            has_env_file: false,
            has_env_example: false,
            has_gitignore: false,
            has_requirements: false,
            has_package_json: false,
            python_files: Vec::new(),
            env_vars_needed: Vec::new(),
            publish_dir: ".".to_string(),
            functions_dir: None,
            build_command: None,
            file_count: 0,
            path: path.to_string(),
            existing_config: None,
        }
    }

    pub(crate) fn set_type(&mut self, project_type: ProjectType) {
        self.project_type = project_type;
        self.type_name = project_type.display_name().to_string();
    }
}
