//! Sites command implementation.
//!
//! The `netlify-ai sites` command lists the account's most recent sites.

use std::sync::Arc;

use crate::error::Result;
use crate::netlify::NetlifyCli;
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The sites command implementation.
pub struct SitesCommand {
    netlify: NetlifyCli,
}

impl SitesCommand {
    /// Create a new sites command.
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            netlify: NetlifyCli::new(runner),
        }
    }
}

impl Command for SitesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut spinner = ui.start_spinner("Fetching sites...");
        let sites = match self.netlify.list_sites() {
            Ok(sites) => sites,
            Err(e) => {
                spinner.finish_error("Could not list sites");
                ui.error(&e.to_string());
                ui.show_hint("Check `netlify-ai doctor` and `netlify login`.");
                return Ok(CommandResult::failure(1));
            }
        };
        spinner.finish_success(&format!("{} site(s)", sites.len()));

        if sites.is_empty() {
            ui.message("No sites yet.");
            return Ok(CommandResult::success());
        }

        let width = sites.iter().map(|s| s.name.len()).max().unwrap_or(0);
        for site in &sites {
            ui.message(&format!(
                "  {:<width$}  {}  {}",
                site.name,
                site.url,
                site.updated,
                width = width
            ));
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandOutput, CommandSpec};
    use crate::ui::MockUI;

    struct Listing(CommandOutput);

    impl CommandRunner for Listing {
        fn run(&self, _spec: &CommandSpec) -> Result<CommandOutput> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn lists_sites() {
        let json = r#"[{"name":"demo","ssl_url":"https://demo.netlify.app","updated_at":"2024-05-01T10:00:00Z"}]"#;
        let cmd = SitesCommand::new(Arc::new(Listing(CommandOutput::success(json, ""))));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_message("https://demo.netlify.app"));
        assert!(ui.has_message("2024-05-01"));
    }

    #[test]
    fn missing_cli_exits_one() {
        let cmd = SitesCommand::new(Arc::new(Listing(CommandOutput::failure(
            Some(127),
            "",
            "netlify: command not found",
        ))));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("netlify site list"));
    }

    #[test]
    fn empty_listing() {
        let cmd = SitesCommand::new(Arc::new(Listing(CommandOutput::success("[]", ""))));
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();
        assert!(ui.has_message("No sites yet."));
    }
}
