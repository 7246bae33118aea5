//! Deploy wizard.
//!
//! `netlify-ai [PATH]` and `netlify-ai deploy [PATH]` walk through five steps:
//! analyse, confirm configuration, generate files, prepare the netlify CLI,
//! and deploy. Every question has a prompt key so non-interactive runs can
//! answer it through `NETLIFY_AI_PROMPT_<KEY>`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::{report_lines, ProjectAnalysis, ProjectAnalyzer, NODE_BUILD_COMMAND};
use crate::cli::args::DeployArgs;
use crate::config::Settings;
use crate::error::{DeployError, Result};
use crate::generate::{
    render_env_example, render_gitignore, render_netlify_toml, render_requirements, ConfigWriter,
    NetlifyTomlOptions, WriteOutcome,
};
use crate::netlify::{DeployKind, DeployOutcome, NetlifyCli};
use crate::requirements::{check, RequirementStatus, NETLIFY_CLI};
use crate::secrets::SecretMatcher;
use crate::shell::CommandRunner;
use crate::ui::{Prompt, PromptOption, PromptType, UserInterface};

use super::dispatcher::{Command, CommandResult};

const TOTAL_STEPS: usize = 5;

/// Default functions directory offered for Python projects.
pub const DEFAULT_FUNCTIONS_DIR: &str = "netlify/functions";

/// Lines of deploy stderr shown when a deploy fails.
const ERROR_TAIL: usize = 10;

/// Values confirmed in step 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployPlan {
    pub publish_dir: String,
    pub functions_dir: Option<String>,
    pub build_command: Option<String>,
}

/// The deploy wizard.
pub struct DeployCommand {
    args: DeployArgs,
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
}

impl DeployCommand {
    /// Create a new deploy command.
    pub fn new(args: DeployArgs, settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            args,
            settings,
            runner,
        }
    }

    /// Get the command arguments.
    pub fn args(&self) -> &DeployArgs {
        &self.args
    }

    /// Main menu shown when no path was given. `None` means quit.
    fn choose_path(&self, ui: &mut dyn UserInterface) -> Result<Option<PathBuf>> {
        let cwd = std::env::current_dir()?;
        let menu = Prompt::new(
            "menu",
            "What would you like to do?",
            PromptType::Select {
                options: vec![
                    PromptOption {
                        label: format!("Deploy the current directory ({})", cwd.display()),
                        value: "current".to_string(),
                    },
                    PromptOption {
                        label: "Enter a project path".to_string(),
                        value: "path".to_string(),
                    },
                    PromptOption {
                        label: "Quit".to_string(),
                        value: "quit".to_string(),
                    },
                ],
            },
        )
        .with_default("current");

        loop {
            match ui.prompt(&menu)?.as_string().as_str() {
                "current" => return Ok(Some(cwd)),
                "path" => {
                    let cwd_shown = cwd.display().to_string();
                    let entered = ui.input("project_path", "Project path", Some(&cwd_shown))?;
                    if !entered.is_empty() {
                        return Ok(Some(PathBuf::from(entered)));
                    }
                    if !ui.is_interactive() {
                        return Err(DeployError::BadRequest {
                            message: "No project path given".to_string(),
                        });
                    }
                    ui.warning("Please enter a path");
                }
                _ => return Ok(None),
            }
        }
    }

    /// Step 2: publish dir, functions dir and build command.
    fn confirm_configuration(
        &self,
        ui: &mut dyn UserInterface,
        analysis: &ProjectAnalysis,
    ) -> Result<DeployPlan> {
        let existing = analysis.existing_config.as_ref();

        let publish_default = existing
            .and_then(|c| c.publish.clone())
            .unwrap_or_else(|| self.settings.build.publish_dir.clone());
        let publish_dir = ui.input("publish_dir", "Publish directory", Some(&publish_default))?;
        let publish_dir = if publish_dir.is_empty() {
            publish_default
        } else {
            publish_dir
        };

        let mut functions_dir = None;
        if analysis.has_python {
            let detected = existing
                .and_then(|c| c.functions.clone())
                .or_else(|| analysis.functions_dir.clone());
            match detected {
                Some(dir) => {
                    ui.message(&format!("  Functions directory found: {}", dir));
                    let dir = ui.input("functions_dir", "Functions directory", Some(&dir))?;
                    functions_dir = Some(dir).filter(|d| !d.is_empty());
                }
                None => {
                    if ui.confirm("setup_functions", "Set up Python serverless functions?", true)? {
                        let dir = ui.input(
                            "functions_dir",
                            "Functions directory",
                            Some(DEFAULT_FUNCTIONS_DIR),
                        )?;
                        functions_dir = Some(dir).filter(|d| !d.is_empty());
                    }
                }
            }
        }

        let mut build_command = None;
        if analysis.has_node {
            let default = existing
                .and_then(|c| c.command.clone())
                .or_else(|| analysis.build_command.clone())
                .unwrap_or_else(|| NODE_BUILD_COMMAND.to_string());
            let command = ui.input(
                "build_command",
                "Build command (leave empty for none)",
                Some(&default),
            )?;
            build_command = Some(command).filter(|c| !c.is_empty());
        }

        Ok(DeployPlan {
            publish_dir,
            functions_dir,
            build_command,
        })
    }

    /// Step 3: write the files the project is missing.
    fn generate_files(
        &self,
        ui: &mut dyn UserInterface,
        root: &Path,
        analysis: &ProjectAnalysis,
        plan: &DeployPlan,
    ) -> Result<()> {
        let writer = ConfigWriter::new(root);

        let write_toml = !analysis.has_netlify_config
            || ui.confirm("regenerate_toml", "netlify.toml exists. Regenerate it?", false)?;
        if write_toml {
            let content = render_netlify_toml(&NetlifyTomlOptions {
                publish_dir: plan.publish_dir.clone(),
                functions_dir: plan.functions_dir.clone(),
                build_command: plan.build_command.clone(),
                python_version: self.settings.build.python_version.clone(),
            });
            ui.message("  netlify.toml preview:");
            for line in content.lines() {
                ui.message(&format!("    {}", line));
            }
            if ui.confirm("write_toml", "Write netlify.toml?", true)? {
                // Regeneration was already confirmed above.
                write_reported(ui, &writer, "netlify.toml", &content, Overwrite::Yes)?;
            }
        }

        if !analysis.has_gitignore && ui.confirm("gitignore", "Create .gitignore?", true)? {
            write_reported(ui, &writer, ".gitignore", &render_gitignore(), Overwrite::Ask)?;
        }

        if !analysis.has_env_example
            && !analysis.env_vars_needed.is_empty()
            && ui.confirm("env_example", "Create .env.example?", true)?
        {
            let content = render_env_example(&analysis.env_vars_needed);
            write_reported(ui, &writer, ".env.example", &content, Overwrite::Ask)?;
        }

        if let Some(dir) = &plan.functions_dir {
            if !analysis.has_requirements {
                let relative = format!("{}/requirements.txt", dir.trim_end_matches('/'));
                let question = format!("Create {}?", relative);
                if ui.confirm("requirements", &question, true)? {
                    let content = render_requirements(&analysis.env_vars_needed);
                    write_reported(ui, &writer, &relative, &content, Overwrite::Ask)?;
                }
            }
        }

        Ok(())
    }

    /// Step 4. `Some` ends the wizard with that result.
    fn prepare_cli(
        &self,
        ui: &mut dyn UserInterface,
        netlify: &NetlifyCli,
    ) -> Result<Option<CommandResult>> {
        match check(&NETLIFY_CLI, self.runner.as_ref()) {
            RequirementStatus::Present { version, .. } => {
                ui.success(&format!("Netlify CLI found ({})", version));
            }
            RequirementStatus::Missing => {
                ui.error("Netlify CLI not found");
                ui.show_hint(&format!("Install it with: {}", NETLIFY_CLI.install_hint));
                ui.show_hint("The configuration files are ready; deploy once the CLI is installed.");
                return Ok(Some(CommandResult::success()));
            }
        }

        if netlify.is_logged_in() {
            ui.success("Logged in to Netlify");
            return Ok(None);
        }

        ui.warning("Not logged in to Netlify");
        if !ui.confirm("login", "Log in now? (opens a browser)", true)? {
            ui.warning("Continuing without login");
            ui.show_hint("The deploy needs NETLIFY_AUTH_TOKEN or an earlier `netlify login`.");
            return Ok(None);
        }

        let outcome = netlify.login(ui.is_interactive())?;
        if outcome.success {
            ui.success("Logged in to Netlify");
            Ok(None)
        } else {
            ui.error("Login failed");
            show_tail(ui, &outcome.stderr);
            Ok(Some(CommandResult::failure(1)))
        }
    }

    /// Ask for each needed environment variable and set it on the site.
    fn set_env_vars(
        &self,
        ui: &mut dyn UserInterface,
        netlify: &NetlifyCli,
        env_vars: &[String],
    ) -> Result<()> {
        if env_vars.is_empty() {
            return Ok(());
        }
        ui.message(&format!("  Environment variables: {}", env_vars.join(", ")));
        if !ui.confirm("set_env", "Set environment variables now?", true)? {
            return Ok(());
        }

        let secrets = SecretMatcher::with_builtins();
        for var in env_vars {
            let key = format!("env_{}", var.to_ascii_lowercase());
            let question = format!("{} (leave empty to skip)", var);
            let value = if secrets.is_secret(var) {
                ui.password(&key, &question)?
            } else {
                ui.input(&key, &question, None)?
            };
            if value.is_empty() {
                ui.message(&format!("  Skipped {}", var));
                continue;
            }
            if netlify.set_env(var, &value)? {
                ui.success(&format!("Set {}", var));
            } else {
                ui.warning(&format!("Could not set {}", var));
            }
        }
        Ok(())
    }

    fn run_deploy(
        &self,
        ui: &mut dyn UserInterface,
        netlify: &NetlifyCli,
        kind: DeployKind,
    ) -> Result<DeployOutcome> {
        let label = match kind {
            DeployKind::Preview => "preview",
            DeployKind::Production => "production",
        };
        let mut spinner = ui.start_spinner(&format!("Deploying {}...", label));
        let outcome = netlify.deploy(kind)?;
        if outcome.success {
            spinner.finish_success(&format!("Deployed {}", label));
        } else {
            spinner.finish_error(&format!("{} deploy failed", label));
        }
        if ui.output_mode().shows_command_output() {
            for line in outcome.stdout.lines() {
                ui.message(line);
            }
        }
        Ok(outcome)
    }

    /// Step 5.
    fn deploy(
        &self,
        ui: &mut dyn UserInterface,
        netlify: &NetlifyCli,
        analysis: &ProjectAnalysis,
    ) -> Result<CommandResult> {
        if !ui.confirm("deploy", "Deploy now?", true)? {
            ui.message("Deployment skipped");
            ui.show_hint("Deploy later with: netlify deploy");
            return Ok(CommandResult::success());
        }

        if ui.confirm("init_site", "Create or link a Netlify site first (netlify init)?", true)?
            && !netlify.init_site()?
        {
            ui.warning("netlify init did not finish; continuing with the deploy");
        }

        self.set_env_vars(ui, netlify, &analysis.env_vars_needed)?;

        let preview = self.run_deploy(ui, netlify, DeployKind::Preview)?;
        if !preview.success {
            ui.error("Preview deploy failed");
            show_tail(ui, &preview.stderr);
            return Ok(CommandResult::failure(1));
        }
        match &preview.url {
            Some(url) => ui.success(&format!("Preview: {}", url)),
            None => ui.success("Preview deployed"),
        }

        if ui.confirm("production", "Deploy to production?", true)? {
            let production = self.run_deploy(ui, netlify, DeployKind::Production)?;
            if !production.success {
                ui.error("Production deploy failed");
                show_tail(ui, &production.stderr);
                return Ok(CommandResult::failure(1));
            }
            match &production.url {
                Some(url) => ui.success(&format!("Live: {}", url)),
                None => ui.success("Production deployed"),
            }
        }

        ui.show_header("Deployment finished");
        ui.message("Thanks for using Netlify AI!");
        Ok(CommandResult::success())
    }
}

/// What to do when the target file already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overwrite {
    Yes,
    /// Ask `overwrite_<name>`, default no.
    Ask,
}

/// Prompt key for replacing `relative`, e.g. `overwrite_env_example`.
fn overwrite_key(relative: &str) -> String {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    let stem = name.strip_suffix(".txt").unwrap_or(name).trim_start_matches('.');
    format!("overwrite_{}", stem.replace(['.', '-'], "_"))
}

fn write_reported(
    ui: &mut dyn UserInterface,
    writer: &ConfigWriter,
    relative: &str,
    content: &str,
    overwrite: Overwrite,
) -> Result<()> {
    let mut outcome = writer.write(relative, content, overwrite == Overwrite::Yes)?;
    if outcome == WriteOutcome::Exists {
        let question = format!("{} already exists. Overwrite it?", relative);
        if ui.confirm(&overwrite_key(relative), &question, false)? {
            outcome = writer.write(relative, content, true)?;
        }
    }
    match outcome {
        WriteOutcome::Written => ui.success(&format!("Wrote {}", relative)),
        WriteOutcome::Exists => ui.warning(&format!("{} exists, left unchanged", relative)),
    }
    Ok(())
}

fn show_tail(ui: &mut dyn UserInterface, output: &str) {
    let lines: Vec<_> = output.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(ERROR_TAIL);
    for line in &lines[start..] {
        ui.message(&format!("  {}", line));
    }
}

impl Command for DeployCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Netlify AI deploy assistant");

        let path = match &self.args.path {
            Some(path) => path.clone(),
            None => match self.choose_path(ui)? {
                Some(path) => path,
                None => {
                    ui.message("Bye!");
                    return Ok(CommandResult::success());
                }
            },
        };

        let mut analyzer = match ProjectAnalyzer::new(&path) {
            Ok(analyzer) => analyzer,
            Err(e @ (DeployError::PathNotFound { .. } | DeployError::NotADirectory { .. })) => {
                ui.error(&e.to_string());
                return Ok(CommandResult::failure(1));
            }
            Err(e) => return Err(e),
        };
        let root = analyzer.root().to_path_buf();
        tracing::info!("Deploying {}", root.display());

        ui.show_step(1, TOTAL_STEPS, "Analyse project");
        let analysis = analyzer.analyze();
        for line in report_lines(&analysis) {
            ui.message(&line);
        }
        if !ui.confirm("continue", "Continue with this project?", true)? {
            ui.message("Stopped after analysis");
            return Ok(CommandResult::success());
        }

        ui.show_step(2, TOTAL_STEPS, "Confirm configuration");
        let plan = self.confirm_configuration(ui, &analysis)?;

        ui.show_step(3, TOTAL_STEPS, "Generate files");
        self.generate_files(ui, &root, &analysis, &plan)?;

        ui.show_step(4, TOTAL_STEPS, "Prepare Netlify CLI");
        let netlify = NetlifyCli::new(Arc::clone(&self.runner)).in_dir(&root);
        if let Some(result) = self.prepare_cli(ui, &netlify)? {
            return Ok(result);
        }

        ui.show_step(5, TOTAL_STEPS, "Deploy");
        self.deploy(ui, &netlify, &analysis)
    }
}
