//! Project analysis.
//!
//! - [`scan`] - Recursive file listing with an ignore list
//! - [`project`] - Project classification ([`ProjectAnalyzer`])
//! - [`env_vars`] - Keyword-based environment variable detection
//! - [`report`] - Human-readable report rendering
//!
//! # Example
//!
//! ```
//! use netlify_ai::analysis::{classify, ProjectType};
//!
//! let files = vec!["index.html".to_string(), "netlify/functions/api.py".to_string()];
//! let analysis = classify("/my/site", &files);
//! assert_eq!(analysis.project_type, ProjectType::PythonFunctions);
//! assert_eq!(analysis.functions_dir.as_deref(), Some("netlify/functions"));
//! ```

pub mod env_vars;
pub mod project;
pub mod report;
pub mod scan;
pub mod types;

pub use env_vars::{detect_env_vars, EnvVarRule, ENV_VAR_RULES};
pub use project::{classify, resolve_project_dir, ProjectAnalyzer, NODE_BUILD_COMMAND};
pub use report::report_lines;
pub use scan::{find_by_name, scan_files, IGNORED_DIRS};
pub use types::{ExistingBuildConfig, ProjectAnalysis, ProjectType};
