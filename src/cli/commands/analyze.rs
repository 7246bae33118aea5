//! Analyze command implementation.
//!
//! The `netlify-ai analyze` command prints what the analyser detected.

use crate::analysis::{report_lines, ProjectAnalyzer};
use crate::cli::args::AnalyzeArgs;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The analyze command implementation.
pub struct AnalyzeCommand {
    args: AnalyzeArgs,
}

impl AnalyzeCommand {
    /// Create a new analyze command.
    pub fn new(args: AnalyzeArgs) -> Self {
        Self { args }
    }
}

impl Command for AnalyzeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut analyzer = ProjectAnalyzer::new(&self.args.path)?;
        let analysis = analyzer.analyze();

        if self.args.json {
            let json = serde_json::to_string_pretty(&analysis).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        ui.show_header("Project analysis");
        for line in report_lines(&analysis) {
            ui.message(&line);
        }
        Ok(CommandResult::success())
    }
}
