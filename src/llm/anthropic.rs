//! Anthropic messages-API provider.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{CompletionRequest, CompletionResponse, LlmProvider, Role};

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";
const PROVIDER: &str = "anthropic";

/// The messages API requires max_tokens; this is the fallback when the
/// request doesn't set one.
const DEFAULT_MAX_TOKENS: u32 = 1024;

pub struct AnthropicProvider {
    client: Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl AnthropicProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct WireResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Split system messages out into the top-level `system` field and map the
/// rest onto the user/assistant alternation the messages API expects.
fn to_wire(request: &CompletionRequest) -> (Option<String>, Vec<WireMessage>) {
    let mut system_parts = Vec::new();
    let mut messages = Vec::new();
    for message in &request.messages {
        match message.role {
            Role::System => system_parts.push(message.content.clone()),
            Role::User => messages.push(WireMessage {
                role: "user",
                content: message.content.clone(),
            }),
            Role::Assistant => messages.push(WireMessage {
                role: "assistant",
                content: message.content.clone(),
            }),
        }
    }
    let system = if system_parts.is_empty() {
        None
    } else {
        Some(system_parts.join("\n\n"))
    };
    (system, messages)
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let (system, messages) = to_wire(&request);
        let body = WireRequest {
            model: &self.model,
            max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            system,
            messages,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed {
                provider: PROVIDER.to_string(),
                reason: format!("HTTP {status}: {detail}"),
            });
        }

        let parsed: WireResponse =
            response.json().await.map_err(|e| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })?;

        let content = parsed
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .map(|block| block.text)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contained no text block".to_string(),
            })?;

        Ok(CompletionResponse { content })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
