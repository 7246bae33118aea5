//! Interactive prompts.

use std::io;

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};

use crate::error::{DeployError, Result};

use super::{is_truthy, Prompt, PromptOption, PromptResult, PromptType};

/// Ctrl+C while a prompt is open becomes [`DeployError::Cancelled`].
fn map_dialoguer_err(e: dialoguer::Error) -> DeployError {
    let io_err: io::Error = e.into();
    if io_err.kind() == io::ErrorKind::Interrupted {
        DeployError::Cancelled
    } else {
        DeployError::Io(io_err)
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = ColorfulTheme::default();
    match &prompt.prompt_type {
        PromptType::Confirm => {
            let default = prompt.default.as_deref().map(is_truthy).unwrap_or(true);
            let answer = Confirm::with_theme(&theme)
                .with_prompt(&prompt.question)
                .default(default)
                .interact_on(term)
                .map_err(map_dialoguer_err)?;
            Ok(PromptResult::Bool(answer))
        }
        PromptType::Input => {
            let mut input = Input::<String>::with_theme(&theme)
                .with_prompt(&prompt.question)
                .allow_empty(true);
            if let Some(default) = &prompt.default {
                input = input.default(default.clone());
            }
            let answer = input.interact_on(term).map_err(map_dialoguer_err)?;
            Ok(PromptResult::String(answer))
        }
        PromptType::Password => {
            let answer = Password::with_theme(&theme)
                .with_prompt(&prompt.question)
                .allow_empty_password(true)
                .interact_on(term)
                .map_err(map_dialoguer_err)?;
            Ok(PromptResult::String(answer))
        }
        PromptType::Select { options } => prompt_select(prompt, options, term, &theme),
    }
}

fn prompt_select(
    prompt: &Prompt,
    options: &[PromptOption],
    term: &Term,
    theme: &ColorfulTheme,
) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();
    let default_idx = prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0);

    let selection = Select::with_theme(theme)
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(default_idx)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    options
        .get(selection)
        .map(|o| PromptResult::String(o.value.clone()))
        .ok_or(DeployError::Cancelled)
}
