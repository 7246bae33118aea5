//! OpenAI chat completions.

use reqwest::blocking::Client;
use serde_json::json;

use super::chat::{reply_text, send, ChatRequest, MAX_TOKENS, TEMPERATURE};
use super::provider::Endpoint;
use crate::error::Result;

pub(crate) fn chat(client: &Client, endpoint: &Endpoint, request: &ChatRequest<'_>) -> Result<String> {
    let mut messages = vec![json!({"role": "system", "content": request.system})];
    if let Some(context) = request.context_line() {
        messages.push(json!({"role": "system", "content": context}));
    }
    messages.push(json!({"role": "user", "content": request.message}));

    let body = json!({
        "model": endpoint.model,
        "messages": messages,
        "max_tokens": MAX_TOKENS,
        "temperature": TEMPERATURE,
    });

    let reply = send(
        client
            .post(endpoint.url("/v1/chat/completions"))
            .bearer_auth(&endpoint.api_key)
            .json(&body),
    )?;
    reply_text(&reply, "/choices/0/message/content")
}
