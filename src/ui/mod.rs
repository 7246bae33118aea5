//! Terminal interaction for the wizard and the other commands.
//!
//! Commands only talk to [`UserInterface`]. [`create_ui`] picks the
//! front-end: [`TerminalUI`] on a TTY, [`NonInteractiveUI`] in CI or with
//! `--non-interactive`. Tests use [`MockUI`].
//!
//! ```
//! use netlify_ai::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.show_header("Netlify AI");
//! ui.success("Deployed!");
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod spinner;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::{NonInteractiveUI, PROMPT_ENV_PREFIX};
pub use output::OutputMode;
pub use prompts::prompt_user;
pub use spinner::ProgressSpinner;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, DeployTheme, Tone};

use crate::error::Result;

/// Everything a command may show or ask.
///
/// `prompt` is the only required input method; `confirm`, `input` and
/// `password` are built on it.
pub trait UserInterface {
    fn output_mode(&self) -> OutputMode;

    /// Plain line on stdout.
    fn message(&mut self, msg: &str);

    fn success(&mut self, msg: &str);

    /// Goes to stderr on a terminal.
    fn warning(&mut self, msg: &str);

    /// Goes to stderr, even in quiet modes.
    fn error(&mut self, msg: &str);

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult>;

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle>;

    /// Framed banner.
    fn show_header(&mut self, title: &str);

    /// `[current/total] title`
    fn show_step(&mut self, current: usize, total: usize, title: &str);

    fn show_hint(&mut self, hint: &str);

    /// Whether a person can answer prompts.
    fn is_interactive(&self) -> bool;

    /// Yes/no question.
    fn confirm(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        let prompt = Prompt::new(key, question, PromptType::Confirm)
            .with_default(if default { "true" } else { "false" });
        Ok(self.prompt(&prompt)?.as_bool().unwrap_or(default))
    }

    /// Free-form text, trimmed.
    fn input(&mut self, key: &str, question: &str, default: Option<&str>) -> Result<String> {
        let mut prompt = Prompt::new(key, question, PromptType::Input);
        if let Some(default) = default {
            prompt = prompt.with_default(default);
        }
        Ok(self.prompt(&prompt)?.as_string().trim().to_string())
    }

    /// Hidden text input; empty is allowed.
    fn password(&mut self, key: &str, question: &str) -> Result<String> {
        let prompt = Prompt::new(key, question, PromptType::Password);
        Ok(self.prompt(&prompt)?.as_string().trim().to_string())
    }
}

/// A running spinner; the `finish_*` calls replace it with a status line.
pub trait SpinnerHandle {
    fn set_message(&mut self, msg: &str);
    fn finish_success(&mut self, msg: &str);
    fn finish_error(&mut self, msg: &str);
}

/// One question. `key` names it for scripted answers and for
/// `NETLIFY_AI_PROMPT_<KEY>` overrides.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub key: String,
    pub question: String,
    pub prompt_type: PromptType,
    /// Answer used on plain Enter.
    pub default: Option<String>,
}

impl Prompt {
    pub fn new(key: &str, question: &str, prompt_type: PromptType) -> Self {
        Self {
            key: key.to_string(),
            question: question.to_string(),
            prompt_type,
            default: None,
        }
    }

    pub fn with_default(mut self, default: &str) -> Self {
        self.default = Some(default.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub enum PromptType {
    Confirm,
    Input,
    /// Not echoed.
    Password,
    /// Answers with the chosen option's `value`.
    Select { options: Vec<PromptOption> },
}

#[derive(Debug, Clone)]
pub struct PromptOption {
    pub label: String,
    pub value: String,
}

/// `Bool` for confirms, `String` for everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult {
    Bool(bool),
    String(String),
}

/// Words accepted as "yes" in overrides and scripted answers.
pub(crate) fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}

impl PromptResult {
    pub fn as_string(&self) -> String {
        match self {
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s.clone(),
        }
    }

    /// Boolean view; strings such as `yes` or `true` count as true.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::String(s) if s.trim().is_empty() => None,
            Self::String(s) => Some(is_truthy(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_result_as_string() {
        assert_eq!(PromptResult::Bool(true).as_string(), "true");
        assert_eq!(PromptResult::String("public".into()).as_string(), "public");
    }

    #[test]
    fn prompt_result_string_to_bool() {
        assert_eq!(PromptResult::String("yes".into()).as_bool(), Some(true));
        assert_eq!(PromptResult::String("Y".into()).as_bool(), Some(true));
        assert_eq!(PromptResult::String("no".into()).as_bool(), Some(false));
        assert_eq!(PromptResult::String(String::new()).as_bool(), None);
    }

    #[test]
    fn confirm_helper_uses_scripted_answer() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("continue", "no");
        assert!(!ui.confirm("continue", "Continue?", true).unwrap());
        assert!(ui.confirm("other", "Other?", true).unwrap());
    }

    #[test]
    fn input_helper_trims() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("publish_dir", "  public  ");
        assert_eq!(
            ui.input("publish_dir", "Publish directory", Some(".")).unwrap(),
            "public"
        );
    }

    #[test]
    fn prompt_builder_sets_default() {
        let prompt = Prompt::new("k", "Q?", PromptType::Input).with_default("d");
        assert_eq!(prompt.default.as_deref(), Some("d"));
    }
}
