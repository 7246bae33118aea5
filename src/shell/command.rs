//! External command execution.
//!
//! Commands are spawned directly from an argv list, never through a shell,
//! so user-supplied values (site names, env var values) cannot be
//! reinterpreted.

use crate::error::{DeployError, Result};
use crate::secrets::OutputMasker;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use super::platform::program_name;

/// Result of executing a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty when inherited).
    pub stdout: String,

    /// Standard error (empty when inherited).
    pub stderr: String,

    /// Whether the command exited with status 0.
    pub success: bool,

    /// Execution duration.
    pub duration: Duration,
}

impl CommandOutput {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: true,
            duration: Duration::ZERO,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self {
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
            success: false,
            duration: Duration::ZERO,
        }
    }

    /// stdout and stderr joined by a newline.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// How the child's stdio is wired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdioMode {
    /// Capture stdout and stderr.
    #[default]
    Capture,
    /// Share the parent's terminal (for interactive commands).
    Inherit,
}

/// A command to run.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    /// Program name, looked up on PATH.
    pub program: String,
    /// Arguments passed verbatim.
    pub args: Vec<String>,
    /// Working directory.
    pub cwd: Option<PathBuf>,
    /// Stdio handling.
    pub stdio: StdioMode,
    /// Argument values that must never appear in logs.
    pub redact: Vec<String>,
}

impl CommandSpec {
    /// Create a spec from a program and arguments.
    pub fn new<I, S>(program: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Run inside `dir`.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    /// Inherit the terminal instead of capturing output.
    pub fn interactive(mut self) -> Self {
        self.stdio = StdioMode::Inherit;
        self
    }

    /// Mark a value as secret for display purposes.
    pub fn redacting(mut self, value: &str) -> Self {
        self.redact.push(value.to_string());
        self
    }

    /// The command line with secrets masked, for logs and error messages.
    pub fn display(&self) -> String {
        let masker = OutputMasker::from_values(&self.redact);
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        masker.mask(&line)
    }
}

/// Something that can run external commands.
///
/// The Netlify driver and the requirement probe talk to the outside world
/// only through this trait, which lets tests substitute canned output.
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion.
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        execute(spec)
    }
}

/// Execute a command.
pub fn execute(spec: &CommandSpec) -> Result<CommandOutput> {
    let start = Instant::now();
    tracing::debug!("Running: {}", spec.display());

    let mut cmd = Command::new(program_name(&spec.program));
    cmd.args(&spec.args);

    if let Some(cwd) = &spec.cwd {
        cmd.current_dir(cwd);
    }

    let spawn_err = |e: std::io::Error| DeployError::SpawnFailed {
        program: spec.program.clone(),
        message: e.to_string(),
    };

    let (status, stdout, stderr) = match spec.stdio {
        StdioMode::Capture => {
            cmd.stdin(Stdio::null());
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
            let output = cmd.output().map_err(spawn_err)?;
            (
                output.status,
                String::from_utf8_lossy(&output.stdout).into_owned(),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            )
        }
        StdioMode::Inherit => {
            let status = cmd.status().map_err(spawn_err)?;
            (status, String::new(), String::new())
        }
    };

    let duration = start.elapsed();
    tracing::debug!(
        "{} exited with {:?} after {:?}",
        spec.program,
        status.code(),
        duration
    );

    Ok(CommandOutput {
        exit_code: status.code(),
        stdout,
        stderr,
        success: status.success(),
        duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_display_masks_secrets() {
        let spec = CommandSpec::new("netlify", ["env:set", "OPENAI_API_KEY", "sk-123456"])
            .redacting("sk-123456");
        let shown = spec.display();
        assert_eq!(shown, "netlify env:set OPENAI_API_KEY [REDACTED]");
    }

    #[test]
    fn spec_builders() {
        let spec = CommandSpec::new("netlify", ["login"])
            .in_dir(Path::new("/tmp"))
            .interactive();
        assert_eq!(spec.cwd.as_deref(), Some(Path::new("/tmp")));
        assert_eq!(spec.stdio, StdioMode::Inherit);
        assert_eq!(spec.args, vec!["login"]);
    }

    #[test]
    fn combined_output_joins_streams() {
        let out = CommandOutput::success("a", "b");
        assert_eq!(out.combined(), "a\nb");
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-xyz", ["--version"]);
        let err = execute(&spec).unwrap_err();
        assert!(matches!(err, DeployError::SpawnFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn execute_captures_output_and_status() {
        let ok = execute(&CommandSpec::new("sh", ["-c", "echo hello"])).unwrap();
        assert!(ok.success);
        assert_eq!(ok.exit_code, Some(0));
        assert!(ok.stdout.contains("hello"));

        let failed = execute(&CommandSpec::new("sh", ["-c", "echo oops >&2; exit 3"])).unwrap();
        assert!(!failed.success);
        assert_eq!(failed.exit_code, Some(3));
        assert!(failed.stderr.contains("oops"));
    }
}
