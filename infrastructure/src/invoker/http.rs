//! HTTP model invoker for OpenAI-compatible chat completion endpoints.
//!
//! One POST per invocation: system and user text go out as chat messages,
//! the first choice's content comes back as plain text. The adapter owns
//! the request timeout and the model-alias table; the orchestration core
//! never sees either.

use async_trait::async_trait;
use consilium_application::ports::model_invoker::{InvocationError, ModelInvoker};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for the HTTP invoker
#[derive(Debug, Clone)]
pub struct HttpInvokerConfig {
    /// Endpoint root, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    /// Bearer token; `None` for unauthenticated local endpoints
    pub api_key: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Model identifier translations applied before dispatch
    /// (compatibility shims are deployment policy, not engine logic)
    pub aliases: HashMap<String, String>,
}

impl Default for HttpInvokerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            timeout_secs: 120,
            aliases: HashMap::new(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// [`ModelInvoker`] adapter speaking the OpenAI chat completion protocol
pub struct HttpModelInvoker {
    client: reqwest::Client,
    config: HttpInvokerConfig,
}

impl HttpModelInvoker {
    pub fn new(config: HttpInvokerConfig) -> Result<Self, InvocationError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InvocationError::Other(format!("client construction failed: {e}")))?;
        Ok(Self { client, config })
    }

    /// Translate a requested model id through the alias table
    fn resolve_model<'a>(&'a self, model: &'a str) -> &'a str {
        match self.config.aliases.get(model) {
            Some(target) => {
                debug!("Model alias: {} -> {}", model, target);
                target
            }
            None => model,
        }
    }
}

#[async_trait]
impl ModelInvoker for HttpModelInvoker {
    async fn invoke(
        &self,
        model: &str,
        system: &str,
        user: &str,
    ) -> Result<String, InvocationError> {
        let model = self.resolve_model(model);
        let body = ChatRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InvocationError::Timeout
            } else {
                InvocationError::ConnectionError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(InvocationError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Chat endpoint returned {}: {}", status, detail);
            return Err(InvocationError::RequestFailed(format!(
                "{status}: {detail}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InvocationError::RequestFailed(format!("malformed response: {e}")))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(InvocationError::EmptyContent);
        }
        Ok(content)
    }
}
