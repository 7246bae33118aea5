//! Routing from parsed arguments to commands.

use std::sync::Arc;

use crate::cli::args::{Cli, Commands, DeployArgs};
use crate::config::Settings;
use crate::error::{DeployError, Result};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

/// One subcommand. Expected failures are reported through `ui` and a
/// non-zero [`CommandResult`]; `Err` is for everything else.
pub trait Command {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Outcome of a command, mapped to the process exit status by `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandResult {
    pub success: bool,
    pub exit_code: i32,
}

impl CommandResult {
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Builds the command for a parsed [`Cli`] and runs it.
pub struct CommandDispatcher {
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
}

impl CommandDispatcher {
    pub fn new(settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self { settings, runner }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the selected command; the wizard when none was given.
    ///
    /// A cancelled prompt ends any command with "Cancelled" and exit 0.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let command = self.command_for(cli);
        match command.execute(ui) {
            Err(DeployError::Cancelled) => {
                ui.message("");
                ui.warning("Cancelled");
                Ok(CommandResult::success())
            }
            other => other,
        }
    }

    fn command_for(&self, cli: &Cli) -> Box<dyn Command> {
        use super::{
            analyze::AnalyzeCommand, chat::ChatCommand, completions::CompletionsCommand,
            deploy::DeployCommand, doctor::DoctorCommand, generate::GenerateCommand,
            serve::ServeCommand, sites::SitesCommand,
        };

        let settings = || self.settings.clone();
        let runner = || Arc::clone(&self.runner);

        match &cli.command {
            None => {
                let args = DeployArgs {
                    path: cli.path.clone(),
                };
                Box::new(DeployCommand::new(args, settings(), runner()))
            }
            Some(Commands::Deploy(args)) => {
                Box::new(DeployCommand::new(args.clone(), settings(), runner()))
            }
            Some(Commands::Analyze(args)) => Box::new(AnalyzeCommand::new(args.clone())),
            Some(Commands::Generate(args)) => {
                Box::new(GenerateCommand::new(args.clone(), &self.settings))
            }
            Some(Commands::Serve(args)) => {
                Box::new(ServeCommand::new(args.clone(), settings(), runner()))
            }
            Some(Commands::Chat(args)) => Box::new(ChatCommand::new(args.clone(), settings())),
            Some(Commands::Doctor) => Box::new(DoctorCommand::new(settings(), runner())),
            Some(Commands::Sites) => Box::new(SitesCommand::new(runner())),
            Some(Commands::Completions(args)) => {
                Box::new(CompletionsCommand::new(args.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandOutput, CommandSpec};
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    struct NoTools;

    impl CommandRunner for NoTools {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            Err(DeployError::SpawnFailed {
                program: spec.program.clone(),
                message: "not found".into(),
            })
        }
    }

    fn dispatcher() -> CommandDispatcher {
        CommandDispatcher::new(Settings::default(), Arc::new(NoTools))
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(2);
        assert!(!result.success);
        assert_eq!(result.exit_code, 2);
    }

    #[test]
    fn bare_path_runs_wizard_on_it() {
        let cli = Cli::try_parse_from(["netlify-ai", "/definitely/not/here"]).unwrap();
        let mut ui = MockUI::new();
        let result = dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.errors().iter().any(|e| e.contains("/definitely/not/here")));
    }

    #[test]
    fn cancelled_prompt_exits_zero() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("index.html"), "<h1>hi</h1>").unwrap();
        let cli =
            Cli::try_parse_from(["netlify-ai", "deploy", temp.path().to_str().unwrap()]).unwrap();
        let mut ui = MockUI::new();
        ui.cancel_on("continue");
        let result = dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_warning("Cancelled"));
    }

    #[test]
    fn doctor_without_tools_fails() {
        let cli = Cli::try_parse_from(["netlify-ai", "doctor"]).unwrap();
        let mut ui = MockUI::new();
        let result = dispatcher().dispatch(&cli, &mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
    }
}
