//! Doctor command implementation.
//!
//! The `netlify-ai doctor` command probes the external tools and reports
//! which AI providers have a key available.

use std::sync::Arc;

use crate::ai::Provider;
use crate::config::{default_settings_path, Settings};
use crate::error::Result;
use crate::requirements::{check, Requirement, RequirementStatus, NETLIFY_CLI, NODE};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The doctor command implementation.
pub struct DoctorCommand {
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
}

impl DoctorCommand {
    /// Create a new doctor command.
    pub fn new(settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self { settings, runner }
    }

    /// Report one tool; returns whether it is present.
    fn report(&self, ui: &mut dyn UserInterface, requirement: &Requirement, required: bool) -> bool {
        match check(requirement, self.runner.as_ref()) {
            RequirementStatus::Present { version, path } => {
                let location = path
                    .map(|p| format!(" at {}", p.display()))
                    .unwrap_or_default();
                ui.success(&format!("{} {}{}", requirement.name, version, location));
                true
            }
            RequirementStatus::Missing => {
                let msg = format!("{} not found", requirement.name);
                if required {
                    ui.error(&msg);
                } else {
                    ui.warning(&msg);
                }
                ui.show_hint(&format!("Install: {}", requirement.install_hint));
                ui.show_hint(&format!("Download: {}", requirement.url));
                false
            }
        }
    }

    fn key_available(&self, provider: Provider) -> bool {
        let configured = provider
            .settings(&self.settings.ai)
            .api_key
            .as_deref()
            .is_some_and(|k| !k.trim().is_empty());
        let from_env = std::env::var(provider.env_var()).is_ok_and(|k| !k.trim().is_empty());
        configured || from_env
    }
}

impl Command for DoctorCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        ui.show_header("Netlify AI doctor");

        ui.message("Tools:");
        let netlify_ok = self.report(ui, &NETLIFY_CLI, true);
        self.report(ui, &NODE, false);

        ui.message("");
        ui.message("AI providers:");
        for provider in Provider::ALL {
            let state = if self.key_available(provider) {
                "key available"
            } else {
                "no key"
            };
            ui.message(&format!(
                "  {:<14} {} ({})",
                provider.display_name(),
                state,
                provider.env_var()
            ));
        }

        if let Some(path) = default_settings_path() {
            ui.message("");
            let shown = if path.exists() { "" } else { " (not created)" };
            ui.message(&format!("Settings: {}{}", path.display(), shown));
        }

        if netlify_ok {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;
    use crate::shell::{CommandOutput, CommandSpec};
    use crate::ui::MockUI;

    struct Tools {
        present: &'static [&'static str],
    }

    impl CommandRunner for Tools {
        fn run(&self, spec: &CommandSpec) -> Result<CommandOutput> {
            if self.present.contains(&spec.program.as_str()) {
                Ok(CommandOutput::success(format!("{} 1.0.0\n", spec.program), ""))
            } else {
                Err(DeployError::SpawnFailed {
                    program: spec.program.clone(),
                    message: "not found".into(),
                })
            }
        }
    }

    fn run(present: &'static [&'static str]) -> (CommandResult, MockUI) {
        let cmd = DoctorCommand::new(Settings::default(), Arc::new(Tools { present }));
        let mut ui = MockUI::new();
        let result = cmd.execute(&mut ui).unwrap();
        (result, ui)
    }

    #[test]
    fn all_present_succeeds() {
        let (result, ui) = run(&["netlify", "node"]);
        assert!(result.success);
        assert!(ui.has_success("Netlify CLI netlify 1.0.0"));
    }

    #[test]
    fn missing_netlify_exits_one_with_hint_and_url() {
        let (result, ui) = run(&["node"]);
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("Netlify CLI not found"));
        assert!(ui.has_hint("npm install -g netlify-cli"));
        assert!(ui.has_hint("https://docs.netlify.com"));
    }

    #[test]
    fn missing_node_only_warns() {
        let (result, ui) = run(&["netlify"]);
        assert!(result.success);
        assert!(ui.has_warning("Node.js not found"));
    }

    #[test]
    fn configured_key_counts() {
        let mut settings = Settings::default();
        settings.ai.anthropic.api_key = Some("sk-ant-test".to_string());
        let cmd = DoctorCommand::new(settings, Arc::new(Tools { present: &[] }));
        assert!(cmd.key_available(Provider::Anthropic));
    }
}
