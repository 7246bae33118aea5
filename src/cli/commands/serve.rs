//! Serve command implementation.
//!
//! The `netlify-ai serve` command starts the local web studio and blocks
//! until interrupted.

use std::sync::Arc;

use crate::ai::Assistant;
use crate::cli::args::ServeArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::netlify::NetlifyCli;
use crate::server::{Studio, StudioState};
use crate::shell::CommandRunner;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The serve command implementation.
pub struct ServeCommand {
    args: ServeArgs,
    settings: Settings,
    runner: Arc<dyn CommandRunner>,
}

impl ServeCommand {
    /// Create a new serve command.
    pub fn new(args: ServeArgs, settings: Settings, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            args,
            settings,
            runner,
        }
    }

    /// Host and port after applying flags over settings.
    pub fn address(&self) -> (String, u16) {
        let host = self
            .args
            .host
            .clone()
            .unwrap_or_else(|| self.settings.server.host.clone());
        let port = self.args.port.unwrap_or(self.settings.server.port);
        (host, port)
    }

    fn opens_browser(&self) -> bool {
        !self.args.no_browser && self.settings.server.open_browser
    }

    /// Bind the studio without serving yet.
    pub fn bind(&self) -> Result<Studio> {
        let (host, port) = self.address();
        let state = StudioState {
            settings: self.settings.clone(),
            netlify: NetlifyCli::new(Arc::clone(&self.runner)),
            assistant: Assistant::new(self.settings.ai.clone())?,
        };
        Studio::bind(&host, port, state)
    }
}

impl Command for ServeCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let studio = self.bind()?;
        let url = studio.url()?;

        ui.show_header(&format!(
            "Netlify AI Deploy Studio v{}",
            env!("CARGO_PKG_VERSION")
        ));
        ui.message(&format!("  Studio running at {}", url));
        ui.show_hint("Press Ctrl+C to stop");

        if self.opens_browser() {
            studio.open_browser_later()?;
        }

        studio.run()?;
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::SystemRunner;

    fn command(args: ServeArgs, settings: Settings) -> ServeCommand {
        ServeCommand::new(args, settings, Arc::new(SystemRunner))
    }

    #[test]
    fn address_defaults_to_settings() {
        let cmd = command(ServeArgs::default(), Settings::default());
        assert_eq!(cmd.address(), ("127.0.0.1".to_string(), 5886));
    }

    #[test]
    fn flags_override_settings() {
        let args = ServeArgs {
            host: Some("0.0.0.0".to_string()),
            port: Some(9000),
            no_browser: true,
        };
        let cmd = command(args, Settings::default());
        assert_eq!(cmd.address(), ("0.0.0.0".to_string(), 9000));
        assert!(!cmd.opens_browser());
    }

    #[test]
    fn settings_can_disable_browser() {
        let mut settings = Settings::default();
        settings.server.open_browser = false;
        let cmd = command(ServeArgs::default(), settings);
        assert!(!cmd.opens_browser());
    }

    #[test]
    fn binds_ephemeral_port() {
        let args = ServeArgs {
            port: Some(0),
            ..Default::default()
        };
        let studio = command(args, Settings::default()).bind().unwrap();
        let url = studio.url().unwrap();
        assert!(url.starts_with("http://127.0.0.1:"));
        assert!(!url.ends_with(":0"));
    }
}
