//! Driver for the `netlify` command-line tool.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::error::{DeployError, Result};
use crate::shell::{CommandOutput, CommandRunner, CommandSpec};

use super::output::{self, Site, Team};

/// Name of the Netlify CLI executable.
pub const NETLIFY_PROGRAM: &str = "netlify";

/// Preview or production deploy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployKind {
    Preview,
    Production,
}

impl DeployKind {
    /// Parse the studio's `type` field; anything but `preview` is production.
    pub fn from_request(kind: &str) -> Self {
        if kind == "preview" {
            Self::Preview
        } else {
            Self::Production
        }
    }

    fn args(&self) -> &'static [&'static str] {
        match self {
            Self::Preview => &["deploy"],
            Self::Production => &["deploy", "--prod"],
        }
    }
}

/// Result of a deploy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployOutcome {
    pub success: bool,
    pub url: Option<String>,
    pub stdout: String,
    pub stderr: String,
}

/// Result of an operation whose success is judged from its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CliOutcome {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CliOutcome {
    fn judged(output: CommandOutput, success: bool) -> Self {
        Self {
            success,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// Runs `netlify` subcommands inside a project directory.
#[derive(Clone)]
pub struct NetlifyCli {
    runner: Arc<dyn CommandRunner>,
    cwd: Option<PathBuf>,
}

impl std::fmt::Debug for NetlifyCli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetlifyCli").field("cwd", &self.cwd).finish()
    }
}

impl NetlifyCli {
    /// Create a driver that runs in the current directory.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner, cwd: None }
    }

    /// Same driver, running inside `dir`.
    pub fn in_dir(&self, dir: &Path) -> Self {
        Self {
            runner: Arc::clone(&self.runner),
            cwd: Some(dir.to_path_buf()),
        }
    }

    fn spec<I, S>(&self, args: I) -> CommandSpec
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = CommandSpec::new(NETLIFY_PROGRAM, args);
        match &self.cwd {
            Some(dir) => spec.in_dir(dir),
            None => spec,
        }
    }

    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.runner.run(spec)
    }

    /// Installed CLI version, or `None` when `netlify --version` fails.
    pub fn version(&self) -> Option<String> {
        match self.run(&self.spec(["--version"])) {
            Ok(out) if out.success => Some(out.stdout.trim().to_string()),
            Ok(out) => {
                tracing::debug!("netlify --version exited with {:?}", out.exit_code);
                None
            }
            Err(e) => {
                tracing::debug!("netlify CLI unavailable: {}", e);
                None
            }
        }
    }

    /// Whether the CLI is installed.
    pub fn is_installed(&self) -> bool {
        self.version().is_some()
    }

    fn status(&self) -> Result<CommandOutput> {
        self.run(&self.spec(["status"]))
    }

    /// Whether `netlify status` reports a logged-in user.
    pub fn is_logged_in(&self) -> bool {
        self.status()
            .map(|out| output::is_logged_in(&out.stdout))
            .unwrap_or(false)
    }

    /// Run `netlify login`.
    ///
    /// With `interactive`, the browser flow shares the terminal and only the
    /// exit status counts.
    pub fn login(&self, interactive: bool) -> Result<CliOutcome> {
        let mut spec = self.spec(["login"]);
        if interactive {
            spec = spec.interactive();
        }
        let out = self.run(&spec)?;
        let success = out.success || output::login_succeeded(&out.combined());
        Ok(CliOutcome::judged(out, success))
    }

    /// Run the interactive `netlify init`.
    pub fn init_site(&self) -> Result<bool> {
        let out = self.run(&self.spec(["init"]).interactive())?;
        Ok(out.success)
    }

    /// Check whether the directory is linked to a site.
    pub fn linked_site(&self) -> Result<CliOutcome> {
        let out = self.status()?;
        let linked = output::is_site_linked(&out.stdout);
        Ok(CliOutcome::judged(out, linked))
    }

    /// Create a site non-interactively and link it.
    pub fn create_site(&self, name: Option<&str>, account_slug: Option<&str>) -> Result<CliOutcome> {
        let mut args = vec!["sites:create".to_string()];
        if let Some(name) = name.filter(|n| !n.is_empty()) {
            args.extend(["--name".to_string(), name.to_string()]);
        }
        if let Some(slug) = account_slug.filter(|s| !s.is_empty()) {
            args.extend(["--account-slug".to_string(), slug.to_string()]);
        }
        let out = self.run(&self.spec(args))?;
        let success = out.success || output::site_created(&out.combined());
        Ok(CliOutcome::judged(out, success))
    }

    /// Rename the linked site.
    pub fn rename_site(&self, new_name: &str) -> Result<CliOutcome> {
        let out = self.run(&self.spec(["sites:update", "--name", new_name]))?;
        let success = out.success || output::site_updated(&out.stdout);
        Ok(CliOutcome::judged(out, success))
    }

    /// Set a site environment variable.
    pub fn set_env(&self, key: &str, value: &str) -> Result<bool> {
        let spec = self.spec(["env:set", key, value]).redacting(value);
        let out = self.run(&spec)?;
        if !out.success {
            tracing::warn!("{} failed: {}", spec.display(), out.stderr.trim());
        }
        Ok(out.success)
    }

    /// List up to ten sites of the logged-in account.
    pub fn list_sites(&self) -> Result<Vec<Site>> {
        let out = self.run(&self.spec(["sites:list", "--json"]))?;
        parse_listing(&out, output::parse_sites, "site list")
    }

    /// List the account's teams.
    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let out = self.run(&self.spec(["teams:list", "--json"]))?;
        parse_listing(&out, output::parse_teams, "team list")
    }

    /// Deploy and extract the resulting URL.
    pub fn deploy(&self, kind: DeployKind) -> Result<DeployOutcome> {
        let out = self.run(&self.spec(kind.args().iter().copied()))?;
        let url = output::extract_deploy_url(&out.combined());
        let success = out.success || url.is_some();
        if out.stderr.contains("unsettled top-level await") && url.is_some() {
            tracing::debug!("Ignoring Node.js warning on stderr");
        }
        Ok(DeployOutcome {
            success,
            url,
            stdout: out.stdout,
            stderr: out.stderr,
        })
    }

    /// Run an arbitrary `netlify` command line.
    ///
    /// The first element must be `netlify`; anything else is refused.
    pub fn run_raw(&self, argv: &[String]) -> Result<CommandOutput> {
        match argv.split_first() {
            Some((program, args)) if program == NETLIFY_PROGRAM => {
                self.run(&self.spec(args.iter().cloned()))
            }
            Some((program, _)) => Err(DeployError::BadRequest {
                message: format!("Only netlify commands may be run, got '{}'", program),
            }),
            None => Err(DeployError::BadRequest {
                message: "No command given".to_string(),
            }),
        }
    }
}

fn parse_listing<T>(
    out: &CommandOutput,
    parse: fn(&str) -> serde_json::Result<Vec<T>>,
    what: &str,
) -> Result<Vec<T>> {
    if out.stdout.trim().is_empty() {
        return Err(DeployError::CommandFailed {
            command: format!("netlify {}", what),
            code: out.exit_code,
        });
    }
    parse(&out.stdout).map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", what, e).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Returns canned output keyed by the joined argument list.
    #[derive(Default)]
    struct FakeRunner {
        responses: HashMap<String, CommandOutput>,
        calls: Mutex<Vec<CommandSpec>>,
    }

    impl FakeRunner {
        fn respond(mut self, args: &str, out: CommandOutput) -> Self {
            self.responses.insert(args.to_string(), out);
            self
        }
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            self.calls.lock().unwrap().push(spec.clone());
            let key = spec.args.join(" ");
            self.responses
                .get(&key)
                .cloned()
                .ok_or_else(|| DeployError::SpawnFailed {
                    program: spec.program.clone(),
                    message: "not found".into(),
                })
        }
    }

    fn cli(runner: FakeRunner) -> (NetlifyCli, Arc<FakeRunner>) {
        let runner = Arc::new(runner);
        (NetlifyCli::new(runner.clone()), runner)
    }

    #[test]
    fn version_none_when_missing() {
        let (netlify, _) = cli(FakeRunner::default());
        assert!(!netlify.is_installed());
    }

    #[test]
    fn version_trimmed() {
        let (netlify, _) = cli(FakeRunner::default().respond(
            "--version",
            CommandOutput::success("netlify-cli/17.0.0 linux-x64\n", ""),
        ));
        assert_eq!(netlify.version().as_deref(), Some("netlify-cli/17.0.0 linux-x64"));
    }

    #[test]
    fn logged_in_from_status() {
        let (netlify, _) = cli(
            FakeRunner::default().respond("status", CommandOutput::success("Logged in as me", "")),
        );
        assert!(netlify.is_logged_in());
    }

    #[test]
    fn create_site_passes_optional_flags() {
        let (netlify, runner) = cli(FakeRunner::default().respond(
            "sites:create --name demo --account-slug acme",
            CommandOutput::failure(Some(1), "Site Created", "(node) warning"),
        ));
        let outcome = netlify.create_site(Some("demo"), Some("acme")).unwrap();
        assert!(outcome.success);
        assert_eq!(runner.calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn create_site_skips_empty_flags() {
        let (netlify, _) = cli(
            FakeRunner::default()
                .respond("sites:create", CommandOutput::failure(Some(1), "", "boom")),
        );
        let outcome = netlify.create_site(Some(""), None).unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.stderr, "boom");
    }

    #[test]
    fn deploy_with_url_succeeds_despite_exit_code() {
        let (netlify, _) = cli(FakeRunner::default().respond(
            "deploy --prod",
            CommandOutput::failure(
                Some(1),
                "Website URL: https://demo.netlify.app",
                "Warning: Detected unsettled top-level await",
            ),
        ));
        let outcome = netlify.deploy(DeployKind::Production).unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.url.as_deref(), Some("https://demo.netlify.app"));
    }

    #[test]
    fn deploy_failure_without_url() {
        let (netlify, _) = cli(FakeRunner::default().respond(
            "deploy",
            CommandOutput::failure(Some(1), "", "Error: no site id"),
        ));
        let outcome = netlify.deploy(DeployKind::Preview).unwrap();
        assert!(!outcome.success);
        assert!(outcome.url.is_none());
    }

    #[test]
    fn set_env_redacts_value() {
        let (netlify, runner) = cli(FakeRunner::default().respond(
            "env:set SECRET_KEY hunter22",
            CommandOutput::success("Set environment variable", ""),
        ));
        assert!(netlify.set_env("SECRET_KEY", "hunter22").unwrap());
        let calls = runner.calls.lock().unwrap();
        assert!(!calls[0].display().contains("hunter22"));
    }

    #[test]
    fn in_dir_sets_working_directory() {
        let (netlify, runner) = cli(
            FakeRunner::default().respond("status", CommandOutput::success("Current site: x", "")),
        );
        let scoped = netlify.in_dir(Path::new("/srv/site"));
        assert!(scoped.linked_site().unwrap().success);
        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls[0].cwd.as_deref(), Some(Path::new("/srv/site")));
    }

    #[test]
    fn run_raw_only_allows_netlify() {
        let (netlify, _) = cli(FakeRunner::default());
        let err = netlify
            .run_raw(&["rm".to_string(), "-rf".to_string()])
            .unwrap_err();
        assert!(matches!(err, DeployError::BadRequest { .. }));
        assert!(netlify.run_raw(&[]).is_err());
    }

    #[test]
    fn list_sites_empty_output_is_error() {
        let (netlify, _) = cli(FakeRunner::default().respond(
            "sites:list --json",
            CommandOutput::failure(Some(1), "", "Not logged in"),
        ));
        assert!(netlify.list_sites().is_err());
    }

    #[test]
    fn list_teams_parses_json() {
        let (netlify, _) = cli(FakeRunner::default().respond(
            "teams:list --json",
            CommandOutput::success(r#"[{"name":"Acme","slug":"acme","id":"1"}]"#, ""),
        ));
        let teams = netlify.list_teams().unwrap();
        assert_eq!(teams[0].slug, "acme");
    }

    #[test]
    fn deploy_kind_from_request() {
        assert_eq!(DeployKind::from_request("preview"), DeployKind::Preview);
        assert_eq!(DeployKind::from_request("production"), DeployKind::Production);
        assert_eq!(DeployKind::from_request("prod"), DeployKind::Production);
    }
}
