//! Headless front-end used in CI and with `--non-interactive`.
//!
//! Every prompt takes its default. `NETLIFY_AI_PROMPT_<KEY>` in the
//! environment answers the prompt with that key instead, e.g.
//! `NETLIFY_AI_PROMPT_DEPLOY=yes`.

use std::collections::HashMap;

use crate::error::{DeployError, Result};

use super::{OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix of prompt override variables.
pub const PROMPT_ENV_PREFIX: &str = "NETLIFY_AI_PROMPT_";

/// Plain-text UI that never waits for input.
pub struct NonInteractiveUI {
    mode: OutputMode,
    /// Override values keyed by lower-cased prompt key.
    answers: HashMap<String, String>,
}

impl NonInteractiveUI {
    pub fn new(mode: OutputMode) -> Self {
        Self::from_vars(mode, std::env::vars())
    }

    fn from_vars(mode: OutputMode, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        let answers = vars
            .into_iter()
            .filter_map(|(name, value)| {
                name.strip_prefix(PROMPT_ENV_PREFIX)
                    .map(|key| (key.to_ascii_lowercase(), value))
            })
            .collect();
        Self { mode, answers }
    }

    fn out(&self, line: &str) {
        if self.mode.shows_status() {
            println!("{line}");
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.out(msg);
    }

    fn success(&mut self, msg: &str) {
        self.out(&format!("✓ {msg}"));
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            eprintln!("⚠ {msg}");
        }
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {msg}");
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        if let Some(value) = self.answers.get(&prompt.key.to_ascii_lowercase()) {
            tracing::debug!(key = %prompt.key, "prompt answered from environment");
            return Ok(PromptResult::String(value.clone()));
        }

        match (&prompt.prompt_type, &prompt.default) {
            (_, Some(default)) => Ok(PromptResult::String(default.clone())),
            (PromptType::Input | PromptType::Password, None) => {
                Ok(PromptResult::String(String::new()))
            }
            (PromptType::Confirm | PromptType::Select { .. }, None) => {
                Err(DeployError::BadRequest {
                    message: format!(
                        "'{}' needs an answer; set {}{}",
                        prompt.key,
                        PROMPT_ENV_PREFIX,
                        prompt.key.to_ascii_uppercase()
                    ),
                })
            }
        }
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            println!("  {message}");
        }
        Box::new(LineSpinner { mode: self.mode })
    }

    fn show_header(&mut self, title: &str) {
        self.out(&format!("\n{title}\n"));
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        self.out(&format!("\n[{current}/{total}] {title}"));
    }

    fn show_hint(&mut self, hint: &str) {
        self.out(&format!("  {hint}"));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Prints only the final line.
struct LineSpinner {
    mode: OutputMode,
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("✓ {msg}");
        }
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("✗ {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ui_with(pairs: &[(&str, &str)]) -> NonInteractiveUI {
        let vars = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<Vec<_>>();
        NonInteractiveUI::from_vars(OutputMode::Silent, vars)
    }

    #[test]
    fn override_wins_over_default() {
        let mut ui = ui_with(&[("NETLIFY_AI_PROMPT_PUBLISH_DIR", "public")]);
        assert_eq!(ui.input("publish_dir", "Publish?", Some(".")).unwrap(), "public");
    }

    #[test]
    fn unrelated_variables_are_ignored() {
        let mut ui = ui_with(&[("PUBLISH_DIR", "public"), ("HOME", "/root")]);
        assert_eq!(ui.input("publish_dir", "Publish?", Some(".")).unwrap(), ".");
    }

    #[test]
    fn default_used_without_override() {
        let mut ui = ui_with(&[]);
        assert!(ui.confirm("continue", "Continue?", true).unwrap());
        assert!(!ui.confirm("production", "Production?", false).unwrap());
    }

    #[test]
    fn confirm_override_accepts_words() {
        let mut ui = ui_with(&[("NETLIFY_AI_PROMPT_DEPLOY", "yes")]);
        assert!(ui.confirm("deploy", "Deploy?", false).unwrap());
    }

    #[test]
    fn password_without_value_is_empty() {
        let mut ui = ui_with(&[]);
        assert_eq!(ui.password("env_openai_api_key", "Value").unwrap(), "");
    }

    #[test]
    fn select_without_default_names_the_variable() {
        let mut ui = ui_with(&[]);
        let prompt = Prompt::new("menu", "Action?", PromptType::Select { options: vec![] });
        let err = ui.prompt(&prompt).unwrap_err();
        assert!(err.to_string().contains("NETLIFY_AI_PROMPT_MENU"));
    }
}
