//! The deployment assistant: prompt, key resolution and provider dispatch.

use reqwest::blocking::Client;

use super::chat::{http_client, ChatRequest};
use super::provider::{Endpoint, Provider};
use super::{anthropic, google, openai};
use crate::config::AiSettings;
use crate::error::{DeployError, Result};

/// Message sent by [`Assistant::test_connection`].
pub const TEST_MESSAGE: &str = "Reply with OK";

/// Instructions given to every provider.
pub fn system_prompt(language: &str) -> String {
    format!(
        "You are a Netlify deployment expert assistant. Your job is to:\n\
         1. Help users solve deployment problems\n\
         2. Analyse error messages and suggest fixes\n\
         3. Share Netlify best practices\n\
         4. Answer questions about deploying websites\n\
         \n\
         Reply in {}. Keep answers short and clear.",
        language
    )
}

/// Pick the first non-blank key: explicit, then environment, then settings.
pub fn resolve_api_key(
    explicit: Option<&str>,
    from_env: Option<String>,
    configured: Option<&str>,
) -> Option<String> {
    let explicit = explicit.map(str::to_string);
    let configured = configured.map(str::to_string);
    [explicit, from_env, configured]
        .into_iter()
        .flatten()
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

/// Chat front-end over the configured providers.
pub struct Assistant {
    client: Client,
    settings: AiSettings,
}

impl Assistant {
    pub fn new(settings: AiSettings) -> Result<Self> {
        Ok(Self {
            client: http_client()?,
            settings,
        })
    }

    /// Provider named in settings.
    pub fn default_provider(&self) -> Result<Provider> {
        self.settings.provider.parse()
    }

    pub fn system_prompt(&self) -> String {
        system_prompt(&self.settings.response_language)
    }

    /// Resolve model, base URL and key for a provider.
    pub fn endpoint(&self, provider: Provider, api_key: Option<&str>) -> Result<Endpoint> {
        self.endpoint_with_env(provider, api_key, |name| std::env::var(name).ok())
    }

    /// [`Assistant::endpoint`] with an injectable environment lookup.
    pub fn endpoint_with_env(
        &self,
        provider: Provider,
        api_key: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Endpoint> {
        let overrides = provider.settings(&self.settings);
        let api_key = resolve_api_key(
            api_key,
            env(provider.env_var()),
            overrides.api_key.as_deref(),
        )
        .ok_or_else(|| DeployError::MissingApiKey {
            provider: provider.display_name().to_string(),
            env_var: provider.env_var().to_string(),
        })?;

        Ok(Endpoint {
            provider,
            base_url: overrides
                .base_url
                .clone()
                .unwrap_or_else(|| provider.default_base_url().to_string()),
            model: overrides
                .model
                .clone()
                .unwrap_or_else(|| provider.default_model().to_string()),
            api_key,
        })
    }

    /// Ask a question, optionally with a project description.
    pub fn chat(
        &self,
        provider: Provider,
        api_key: Option<&str>,
        message: &str,
        context: Option<&str>,
    ) -> Result<String> {
        if message.trim().is_empty() {
            return Err(DeployError::BadRequest {
                message: "Please enter a message".to_string(),
            });
        }
        let endpoint = self.endpoint(provider, api_key)?;
        self.send(&endpoint, message, context)
    }

    /// Send a chat turn to an already resolved endpoint.
    pub fn send(&self, endpoint: &Endpoint, message: &str, context: Option<&str>) -> Result<String> {
        let system = self.system_prompt();
        let request = ChatRequest {
            system: &system,
            context,
            message,
        };

        tracing::debug!(
            "Sending chat to {} ({})",
            endpoint.provider.display_name(),
            endpoint.model
        );
        let reply = match endpoint.provider {
            Provider::OpenAi => openai::chat(&self.client, endpoint, &request),
            Provider::Anthropic => anthropic::chat(&self.client, endpoint, &request),
            Provider::Google => google::chat(&self.client, endpoint, &request),
        };
        if let Err(e) = &reply {
            tracing::debug!("Chat failed: {}", e);
        }
        reply
    }

    /// Check that a provider answers with the given key.
    pub fn test_connection(&self, provider: Provider, api_key: Option<&str>) -> Result<String> {
        self.chat(provider, api_key, TEST_MESSAGE, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderSettings;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn assistant_for(server: &MockServer) -> Assistant {
        let local = ProviderSettings {
            model: None,
            base_url: Some(server.base_url()),
            api_key: None,
        };
        let settings = AiSettings {
            openai: local.clone(),
            anthropic: local.clone(),
            google: local,
            ..AiSettings::default()
        };
        Assistant::new(settings).unwrap()
    }

    #[test]
    fn resolve_prefers_explicit_then_env_then_settings() {
        assert_eq!(
            resolve_api_key(Some("a"), Some("b".into()), Some("c")).as_deref(),
            Some("a")
        );
        assert_eq!(
            resolve_api_key(Some("  "), Some("b".into()), Some("c")).as_deref(),
            Some("b")
        );
        assert_eq!(resolve_api_key(None, None, Some("c")).as_deref(), Some("c"));
        assert_eq!(resolve_api_key(None, Some(String::new()), None), None);
    }

    #[test]
    fn system_prompt_names_language() {
        let prompt = system_prompt("English");
        assert!(prompt.contains("Netlify deployment expert"));
        assert!(prompt.contains("Reply in English."));
    }

    #[test]
    fn endpoint_uses_overrides_and_defaults() {
        let mut settings = AiSettings::default();
        settings.google.model = Some("gemini-pro".to_string());
        settings.google.api_key = Some("from-settings".to_string());
        let assistant = Assistant::new(settings).unwrap();

        let endpoint = assistant
            .endpoint_with_env(Provider::Google, None, |_| None)
            .unwrap();
        assert_eq!(endpoint.model, "gemini-pro");
        assert_eq!(endpoint.base_url, Provider::Google.default_base_url());
        assert_eq!(endpoint.api_key, "from-settings");

        let endpoint = assistant
            .endpoint_with_env(Provider::Google, None, |_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(endpoint.api_key, "from-env");
    }

    #[test]
    fn missing_key_is_rejected_before_request() {
        let assistant = Assistant::new(AiSettings::default()).unwrap();
        let err = assistant
            .endpoint_with_env(Provider::Anthropic, None, |_| None)
            .unwrap_err();
        match err {
            DeployError::MissingApiKey { env_var, .. } => assert_eq!(env_var, "ANTHROPIC_API_KEY"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn empty_message_is_rejected() {
        let assistant = Assistant::new(AiSettings::default()).unwrap();
        let err = assistant
            .chat(Provider::OpenAi, Some("key"), "  ", None)
            .unwrap_err();
        assert!(matches!(err, DeployError::BadRequest { .. }));
    }

    #[test]
    fn openai_chat_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"choices": [{"message": {"content": "Use netlify deploy"}}]}));
        });

        let assistant = assistant_for(&server);
        let reply = assistant
            .chat(Provider::OpenAi, Some("sk-test"), "How do I deploy?", Some("static"))
            .unwrap();
        assert_eq!(reply, "Use netlify deploy");
        mock.assert();
    }

    #[test]
    fn anthropic_chat_sends_version_header() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "ak-test")
                .header("anthropic-version", "2023-06-01");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"content": [{"type": "text", "text": "OK"}]}));
        });

        let assistant = assistant_for(&server);
        let reply = assistant
            .test_connection(Provider::Anthropic, Some("ak-test"))
            .unwrap();
        assert_eq!(reply, "OK");
        mock.assert();
    }

    #[test]
    fn google_chat_passes_key_as_query() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .query_param("key", "g-test");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "candidates": [{"content": {"parts": [{"text": "Gemini says hi"}]}}]
                }));
        });

        let assistant = assistant_for(&server);
        let reply = assistant
            .chat(Provider::Google, Some("g-test"), "hello", None)
            .unwrap();
        assert_eq!(reply, "Gemini says hi");
        mock.assert();
    }

    #[test]
    fn non_success_status_reports_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(401).body("invalid api key");
        });

        let assistant = assistant_for(&server);
        let err = assistant
            .chat(Provider::OpenAi, Some("bad"), "hello", None)
            .unwrap_err();
        assert_eq!(err.to_string(), "API error: 401 - invalid api key");
    }

    #[test]
    fn unexpected_reply_shape_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/v1/chat/completions");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"choices": []}));
        });

        let assistant = assistant_for(&server);
        let err = assistant
            .chat(Provider::OpenAi, Some("k"), "hello", None)
            .unwrap_err();
        assert!(matches!(err, DeployError::AiRequestFailed { .. }));
    }
}
