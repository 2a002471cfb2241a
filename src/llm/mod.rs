//! LLM integration for Flowly.
//!
//! Supports:
//! - **OpenAI**: chat-completions API (the original backend)
//! - **Anthropic**: messages API
//!
//! Both speak HTTP directly via reqwest and sit behind the `LlmProvider`
//! trait, so the interview driver only ever sees `complete(prompt) -> text`.

mod anthropic;
mod openai;
pub mod provider;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;
pub use provider::*;

use std::sync::Arc;

/// Supported LLM backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmBackend {
    OpenAi,
    Anthropic,
}

/// Configuration for creating an LLM provider.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub backend: LlmBackend,
    pub api_key: secrecy::SecretString,
    pub model: String,
    /// Override for the backend endpoint (compatible proxies, tests).
    pub endpoint: Option<String>,
}

/// Create an LLM provider from configuration.
pub fn create_provider(config: &LlmConfig) -> Arc<dyn LlmProvider> {
    match config.backend {
        LlmBackend::OpenAi => {
            tracing::info!("Using OpenAI (model: {})", config.model);
            let mut provider =
                OpenAiProvider::new(config.api_key.clone(), config.model.clone());
            if let Some(ref endpoint) = config.endpoint {
                provider = provider.with_endpoint(endpoint);
            }
            Arc::new(provider)
        }
        LlmBackend::Anthropic => {
            tracing::info!("Using Anthropic (model: {})", config.model);
            let mut provider =
                AnthropicProvider::new(config.api_key.clone(), config.model.clone());
            if let Some(ref endpoint) = config.endpoint {
                provider = provider.with_endpoint(endpoint);
            }
            Arc::new(provider)
        }
    }
}
