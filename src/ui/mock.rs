//! Scripted front-end for tests.
//!
//! `MockUI` answers prompts from a per-key script and keeps every line it
//! was asked to show, so tests can assert on what a command printed.
//!
//! ```
//! use netlify_ai::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("publish_dir", "public");
//!
//! ui.message("Analysing project");
//! ui.success("Done!");
//!
//! assert!(ui.has_message("Analysing"));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::collections::{HashMap, VecDeque};

use crate::error::{DeployError, Result};

use super::{is_truthy, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shown {
    Message(String),
    Success(String),
    Warning(String),
    Error(String),
    Header(String),
    Hint(String),
    Step(usize, usize, String),
    Spinner(String),
}

/// Recording UI with scripted prompt answers.
///
/// Unanswered prompts fall back to their default, then to `false` or an
/// empty string. `is_interactive` is always false.
#[derive(Debug, Default)]
pub struct MockUI {
    shown: Vec<Shown>,
    answers: HashMap<String, VecDeque<String>>,
    fixed: HashMap<String, String>,
    asked: Vec<String>,
    cancel_key: Option<String>,
}

impl MockUI {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every prompt with this key using `response`.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.fixed.insert(key.to_string(), response.to_string());
    }

    /// Answers consumed in order before the fixed answer applies.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        self.answers
            .entry(key.to_string())
            .or_default()
            .extend(responses.into_iter().map(String::from));
    }

    /// Behave as if the user pressed Ctrl+C at this prompt.
    pub fn cancel_on(&mut self, key: &str) {
        self.cancel_key = Some(key.to_string());
    }

    /// Prompt keys in the order they were asked.
    pub fn prompts_shown(&self) -> &[String] {
        &self.asked
    }

    fn texts(&self, pick: impl Fn(&Shown) -> Option<&String>) -> Vec<String> {
        self.shown.iter().filter_map(pick).cloned().collect()
    }

    fn any(&self, pick: impl Fn(&Shown) -> Option<&String>, needle: &str) -> bool {
        self.shown
            .iter()
            .filter_map(pick)
            .any(|text| text.contains(needle))
    }

    pub fn successes(&self) -> Vec<String> {
        self.texts(|s| match s {
            Shown::Success(t) => Some(t),
            _ => None,
        })
    }

    pub fn errors(&self) -> Vec<String> {
        self.texts(|s| match s {
            Shown::Error(t) => Some(t),
            _ => None,
        })
    }

    pub fn headers(&self) -> Vec<String> {
        self.texts(|s| match s {
            Shown::Header(t) => Some(t),
            _ => None,
        })
    }

    /// Wizard steps as `(current, total, title)`.
    pub fn steps(&self) -> Vec<(usize, usize, String)> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Step(n, total, title) => Some((*n, *total, title.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn has_message(&self, needle: &str) -> bool {
        self.any(
            |s| match s {
                Shown::Message(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_success(&self, needle: &str) -> bool {
        self.any(
            |s| match s {
                Shown::Success(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_warning(&self, needle: &str) -> bool {
        self.any(
            |s| match s {
                Shown::Warning(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_error(&self, needle: &str) -> bool {
        self.any(
            |s| match s {
                Shown::Error(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    pub fn has_hint(&self, needle: &str) -> bool {
        self.any(
            |s| match s {
                Shown::Hint(t) => Some(t),
                _ => None,
            },
            needle,
        )
    }

    /// Spinner labels, in start order.
    pub fn spinners(&self) -> Vec<String> {
        self.texts(|s| match s {
            Shown::Spinner(t) => Some(t),
            _ => None,
        })
    }

    fn scripted(&mut self, key: &str) -> Option<String> {
        self.answers
            .get_mut(key)
            .and_then(VecDeque::pop_front)
            .or_else(|| self.fixed.get(key).cloned())
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        OutputMode::Normal
    }

    fn message(&mut self, msg: &str) {
        self.shown.push(Shown::Message(msg.to_string()));
    }

    fn success(&mut self, msg: &str) {
        self.shown.push(Shown::Success(msg.to_string()));
    }

    fn warning(&mut self, msg: &str) {
        self.shown.push(Shown::Warning(msg.to_string()));
    }

    fn error(&mut self, msg: &str) {
        self.shown.push(Shown::Error(msg.to_string()));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.asked.push(prompt.key.clone());
        if self.cancel_key.as_deref() == Some(prompt.key.as_str()) {
            return Err(DeployError::Cancelled);
        }

        let confirm = matches!(prompt.prompt_type, PromptType::Confirm);
        let answer = self
            .scripted(&prompt.key)
            .or_else(|| prompt.default.clone());

        Ok(match (answer, confirm) {
            (Some(text), true) => PromptResult::Bool(is_truthy(&text)),
            (Some(text), false) => PromptResult::String(text),
            (None, true) => PromptResult::Bool(false),
            (None, false) => PromptResult::String(String::new()),
        })
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.shown.push(Shown::Spinner(message.to_string()));
        Box::new(SilentSpinner)
    }

    fn show_header(&mut self, title: &str) {
        self.shown.push(Shown::Header(title.to_string()));
    }

    fn show_step(&mut self, current: usize, total: usize, title: &str) {
        self.shown
            .push(Shown::Step(current, total, title.to_string()));
    }

    fn show_hint(&mut self, hint: &str) {
        self.shown.push(Shown::Hint(hint.to_string()));
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

struct SilentSpinner;

impl SpinnerHandle for SilentSpinner {
    fn set_message(&mut self, _msg: &str) {}
    fn finish_success(&mut self, _msg: &str) {}
    fn finish_error(&mut self, _msg: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_lines_by_kind() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.warning("careful");
        ui.error("boom");
        ui.show_step(1, 5, "Analyse project");
        let _spinner = ui.start_spinner("Deploying...");
        assert!(ui.has_message("hello"));
        assert!(!ui.has_message("careful"));
        assert!(ui.has_warning("careful"));
        assert!(ui.has_error("boom"));
        assert_eq!(ui.steps(), vec![(1, 5, "Analyse project".to_string())]);
        assert_eq!(ui.spinners(), vec!["Deploying...".to_string()]);
    }

    #[test]
    fn queued_answers_then_fixed_answer() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("env", vec!["a", "b"]);
        ui.set_prompt_response("env", "c");
        let prompt = Prompt::new("env", "Value", PromptType::Input);
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "a");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "b");
        assert_eq!(ui.prompt(&prompt).unwrap().as_string(), "c");
        assert_eq!(ui.prompts_shown().len(), 3);
    }

    #[test]
    fn cancel_on_key() {
        let mut ui = MockUI::new();
        ui.cancel_on("continue");
        let err = ui.confirm("continue", "Continue?", true).unwrap_err();
        assert!(matches!(err, DeployError::Cancelled));
    }

    #[test]
    fn unanswered_confirm_without_default_is_false() {
        let mut ui = MockUI::new();
        let prompt = Prompt::new("x", "X?", PromptType::Confirm);
        assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Bool(false));
    }
}
