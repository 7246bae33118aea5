//! Tool presence probing.
//!
//! A tool is present when `<program> <version flag>` can be spawned and
//! exits 0. The version output is kept for display; it is never compared.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::shell::{program_name, CommandRunner, CommandSpec};

/// An external tool the assistant relies on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requirement {
    /// Display name.
    pub name: &'static str,
    /// Program looked up on PATH.
    pub program: &'static str,
    /// Flag that prints the version and exits 0.
    pub version_flag: &'static str,
    /// How to install it.
    pub install_hint: &'static str,
    /// Where to download it or read about it.
    pub url: &'static str,
}

/// The Netlify CLI.
pub const NETLIFY_CLI: Requirement = Requirement {
    name: "Netlify CLI",
    program: "netlify",
    version_flag: "--version",
    install_hint: "npm install -g netlify-cli",
    url: "https://docs.netlify.com/cli/get-started/",
};

/// Node.js, needed to install and run the Netlify CLI.
pub const NODE: Requirement = Requirement {
    name: "Node.js",
    program: "node",
    version_flag: "--version",
    install_hint: "Install Node.js 18 or newer",
    url: "https://nodejs.org/en/download",
};

/// Outcome of probing a [`Requirement`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RequirementStatus {
    /// The tool ran; `version` is its trimmed first output line.
    Present {
        version: String,
        path: Option<PathBuf>,
    },
    /// The tool could not be run or exited non-zero.
    Missing,
}

impl RequirementStatus {
    /// Whether the tool is usable.
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present { .. })
    }
}

/// Resolve a program on the given PATH entries.
pub fn resolve_tool_path(program: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let name = program_name(program);
    path_entries
        .iter()
        .map(|dir| dir.join(&name))
        .find(|candidate| candidate.is_file() && is_executable(candidate))
}

/// Parse the system PATH into directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Probe a requirement through `runner`.
pub fn check(requirement: &Requirement, runner: &dyn CommandRunner) -> RequirementStatus {
    let spec = CommandSpec::new(requirement.program, [requirement.version_flag]);
    match runner.run(&spec) {
        Ok(out) if out.success => {
            let version = out.stdout.lines().next().unwrap_or("").trim().to_string();
            tracing::debug!("{} present: {}", requirement.name, version);
            RequirementStatus::Present {
                version,
                path: resolve_tool_path(requirement.program, &parse_system_path()),
            }
        }
        Ok(out) => {
            tracing::debug!("{} exited with {:?}", requirement.program, out.exit_code);
            RequirementStatus::Missing
        }
        Err(e) => {
            tracing::debug!("{} not runnable: {}", requirement.program, e);
            RequirementStatus::Missing
        }
    }
}
