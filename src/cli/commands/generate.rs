//! Generate command implementation.
//!
//! The `netlify-ai generate` command writes netlify.toml and its companion
//! files without prompting. Defaults come from the project analysis and the
//! `build` settings; flags override them.

use crate::analysis::ProjectAnalyzer;
use crate::cli::args::GenerateArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::generate::{generate_files, GenerateOptions};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The generate command implementation.
pub struct GenerateCommand {
    args: GenerateArgs,
    python_version: String,
    publish_dir: String,
}

impl GenerateCommand {
    /// Create a new generate command.
    pub fn new(args: GenerateArgs, settings: &Settings) -> Self {
        Self {
            args,
            python_version: settings.build.python_version.clone(),
            publish_dir: settings.build.publish_dir.clone(),
        }
    }
}

impl Command for GenerateCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut analyzer = ProjectAnalyzer::new(&self.args.path)?;
        let analysis = analyzer.analyze();
        let existing = analysis.existing_config.clone().unwrap_or_default();

        let publish_dir = self
            .args
            .publish_dir
            .clone()
            .or(existing.publish)
            .unwrap_or_else(|| self.publish_dir.clone());
        let functions_dir = self
            .args
            .functions_dir
            .clone()
            .or(existing.functions)
            .or_else(|| analysis.functions_dir.clone());
        let build_command = match &self.args.build_command {
            Some(command) => Some(command.clone()).filter(|c| !c.trim().is_empty()),
            None => existing.command.or_else(|| analysis.build_command.clone()),
        };

        let opts = GenerateOptions {
            publish_dir,
            functions_dir,
            build_command,
            python_version: Some(
                self.args
                    .python_version
                    .clone()
                    .unwrap_or_else(|| self.python_version.clone()),
            ),
            env_vars: analysis.env_vars_needed.clone(),
            netlify_toml: true,
            gitignore: !self.args.no_gitignore,
            env_example: !self.args.no_env_example,
            requirements: !self.args.no_requirements,
        };

        let results = generate_files(analyzer.root(), &opts, self.args.force)?;
        let skipped = results.iter().filter(|r| !r.success).count();
        for result in &results {
            if result.success {
                ui.success(&format!("Wrote {}", result.file));
            } else {
                ui.warning(&format!("{} exists, skipped", result.file));
            }
        }
        if skipped > 0 {
            ui.show_hint("Use --force to overwrite existing files.");
        }
        Ok(CommandResult::success())
    }
}
