//! Google Gemini `generateContent`.
//!
//! Gemini takes a single prompt, so instructions, context and the question
//! are folded into one text part.

use reqwest::blocking::Client;
use reqwest::Url;
use serde_json::json;

use super::chat::{reply_text, send, ChatRequest, MAX_TOKENS, TEMPERATURE};
use super::provider::Endpoint;
use crate::error::{DeployError, Result};

fn prompt(request: &ChatRequest<'_>) -> String {
    let mut prompt = format!("{}\n\n", request.system);
    if let Some(context) = request.context_line() {
        prompt.push_str(&context);
        prompt.push_str("\n\n");
    }
    prompt.push_str("User question: ");
    prompt.push_str(request.message);
    prompt
}

pub(crate) fn chat(client: &Client, endpoint: &Endpoint, request: &ChatRequest<'_>) -> Result<String> {
    let path = format!("/v1beta/models/{}:generateContent", endpoint.model);
    let url = Url::parse_with_params(&endpoint.url(&path), &[("key", &endpoint.api_key)])
        .map_err(|e| DeployError::AiRequestFailed {
            message: format!("Invalid Gemini URL: {}", e),
        })?;

    let body = json!({
        "contents": [{"parts": [{"text": prompt(request)}]}],
        "generationConfig": {
            "maxOutputTokens": MAX_TOKENS,
            "temperature": TEMPERATURE,
        },
    });

    let reply = send(client.post(url).json(&body))?;
    reply_text(&reply, "/candidates/0/content/parts/0/text")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_folds_context_and_question() {
        let request = ChatRequest {
            system: "You help.",
            context: Some("python functions"),
            message: "why 404?",
        };
        assert_eq!(
            prompt(&request),
            "You help.\n\nProject info: python functions\n\nUser question: why 404?"
        );
    }

    #[test]
    fn prompt_without_context() {
        let request = ChatRequest {
            system: "You help.",
            context: None,
            message: "hi",
        };
        assert_eq!(prompt(&request), "You help.\n\nUser question: hi");
    }
}
