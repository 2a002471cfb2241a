//! OpenAI chat-completions provider.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::llm::provider::{ChatMessage, CompletionRequest, CompletionResponse, LlmProvider};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const PROVIDER: &str = "openai";

pub struct OpenAiProvider {
    client: Client,
    api_key: SecretString,
    model: String,
    endpoint: String,
}

impl OpenAiProvider {
    pub fn new(api_key: SecretString, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Point the provider at an OpenAI-compatible endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct WireResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = WireRequest {
            model: &self.model,
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
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
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse {
                provider: PROVIDER.to_string(),
                reason: "response contained no choices".to_string(),
            })?;

        Ok(CompletionResponse { content })
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Role;

    #[test]
    fn wire_request_omits_unset_knobs() {
        let messages = vec![ChatMessage {
            role: Role::User,
            content: "hi".to_string(),
        }];
        let body = WireRequest {
            model: "o4-mini",
            messages: &messages,
            max_tokens: None,
            temperature: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"model\":\"o4-mini\""));
        assert!(json.contains("\"role\":\"user\""));
        assert!(!json.contains("max_tokens"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn wire_response_takes_first_choice() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"Hey there!"}}]}"#;
        let parsed: WireResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices[0].message.content, "Hey there!");
    }

    #[test]
    fn provider_reports_model_name() {
        let provider = OpenAiProvider::new(SecretString::from("sk-test"), "o4-mini");
        assert_eq!(provider.model_name(), "o4-mini");
    }
}
