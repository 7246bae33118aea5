//! Anthropic messages API.

use reqwest::blocking::Client;
use serde_json::json;

use super::chat::{reply_text, send, ChatRequest, MAX_TOKENS};
use super::provider::Endpoint;
use crate::error::Result;

const API_VERSION: &str = "2023-06-01";

pub(crate) fn chat(client: &Client, endpoint: &Endpoint, request: &ChatRequest<'_>) -> Result<String> {
    let mut system = request.system.to_string();
    if let Some(context) = request.context_line() {
        system.push_str("\n\n");
        system.push_str(&context);
    }

    let body = json!({
        "model": endpoint.model,
        "max_tokens": MAX_TOKENS,
        "system": system,
        "messages": [{"role": "user", "content": request.message}],
    });

    let reply = send(
        client
            .post(endpoint.url("/v1/messages"))
            .header("x-api-key", &endpoint.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body),
    )?;
    reply_text(&reply, "/content/0/text")
}
