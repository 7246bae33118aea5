//! Chat command implementation.
//!
//! The `netlify-ai chat` command sends one question to the AI assistant.

use crate::ai::{Assistant, Provider};
use crate::analysis::ProjectAnalyzer;
use crate::cli::args::ChatArgs;
use crate::config::Settings;
use crate::error::{DeployError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The chat command implementation.
pub struct ChatCommand {
    args: ChatArgs,
    settings: Settings,
}

impl ChatCommand {
    /// Create a new chat command.
    pub fn new(args: ChatArgs, settings: Settings) -> Self {
        Self { args, settings }
    }

    fn provider(&self) -> Result<Provider> {
        self.args
            .provider
            .as_deref()
            .unwrap_or(&self.settings.ai.provider)
            .parse()
    }

    /// Short JSON description of the project, as the studio sends it.
    fn context(&self) -> Result<Option<String>> {
        let Some(path) = &self.args.path else {
            return Ok(None);
        };
        let analysis = ProjectAnalyzer::new(path)?.analyze();
        let context = serde_json::json!({
            "type": analysis.type_name,
            "env_vars": analysis.env_vars_needed,
        });
        Ok(Some(context.to_string()))
    }
}

impl Command for ChatCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let message = self.args.message.join(" ");
        let provider = self.provider()?;
        let context = self.context()?;
        let assistant = Assistant::new(self.settings.ai.clone())?;

        let mut spinner = ui.start_spinner(&format!("Asking {}...", provider.display_name()));
        let reply = assistant.chat(
            provider,
            self.args.api_key.as_deref(),
            &message,
            context.as_deref(),
        );

        match reply {
            Ok(text) => {
                spinner.finish_success(provider.display_name());
                ui.message(text.trim());
                Ok(CommandResult::success())
            }
            Err(e @ DeployError::MissingApiKey { .. }) => {
                spinner.finish_error("No API key");
                ui.error(&e.to_string());
                ui.show_hint("Pass --api-key or add ai.<provider>.api_key to the settings file.");
                Ok(CommandResult::failure(1))
            }
            Err(
                e @ (DeployError::AiApiError { .. }
                | DeployError::AiRequestFailed { .. }
                | DeployError::BadRequest { .. }),
            ) => {
                spinner.finish_error("Request failed");
                ui.error(&e.to_string());
                Ok(CommandResult::failure(1))
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn settings_for(server: &MockServer) -> Settings {
        let mut settings = Settings::default();
        settings.ai.openai.base_url = Some(server.base_url());
        settings
    }

    fn args(message: &str) -> ChatArgs {
        ChatArgs {
            provider: Some("openai".to_string()),
            api_key: Some("sk-test".to_string()),
            path: None,
            message: message.split(' ').map(String::from).collect(),
        }
    }

    #[test]
    fn prints_reply() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test");
            then.status(200).json_body(json!({
                "choices": [{"message": {"content": "Use netlify deploy --prod"}}]
            }));
        });
        let cmd = ChatCommand::new(args("how do I go live"), settings_for(&server));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        mock.assert();
        assert!(result.success);
        assert!(ui.has_message("netlify deploy --prod"));
    }

    #[test]
    fn api_error_exits_one() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("invalid key");
        });
        let cmd = ChatCommand::new(args("hello"), settings_for(&server));
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("401"));
    }

    #[test]
    fn unknown_provider_is_an_error() {
        let mut a = args("hello");
        a.provider = Some("mistral".to_string());
        let cmd = ChatCommand::new(a, Settings::default());
        let mut ui = MockUI::new();

        let err = cmd.execute(&mut ui).err().unwrap();
        assert!(matches!(err, DeployError::UnknownProvider { .. }));
    }
}
