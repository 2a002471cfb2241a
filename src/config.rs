//! Environment-driven configuration.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{LlmBackend, LlmConfig};

/// How the binary surfaces the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// REST server (default).
    Serve,
    /// Interactive terminal interview.
    Cli,
}

/// Application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root of the flat-file store (forms/ and responses/ live under it).
    pub data_dir: PathBuf,
    /// Port for the REST server.
    pub port: u16,
    pub mode: Mode,
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// - `FLOWLY_DATA_DIR` (default `./data`)
    /// - `FLOWLY_PORT` (default 8080)
    /// - `FLOWLY_MODE` (`serve` | `cli`, default serve)
    /// - `FLOWLY_LLM_BACKEND` (`openai` | `anthropic`, default openai)
    /// - `FLOWLY_MODEL` (default `o4-mini`)
    /// - `FLOWLY_LLM_ENDPOINT` (optional endpoint override)
    /// - `OPENAI_API_KEY` / `ANTHROPIC_API_KEY` (required per backend)
    pub fn from_env() -> Result<Self, ConfigError> {
        let data_dir = std::env::var("FLOWLY_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("./data"));

        let port_raw = std::env::var("FLOWLY_PORT").unwrap_or_else(|_| "8080".to_string());
        let port = port_raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "FLOWLY_PORT".to_string(),
            message: format!("expected a port number, got {port_raw:?}"),
        })?;

        let mode = parse_mode(&std::env::var("FLOWLY_MODE").unwrap_or_else(|_| "serve".into()))?;

        let backend = parse_backend(
            &std::env::var("FLOWLY_LLM_BACKEND").unwrap_or_else(|_| "openai".into()),
        )?;
        let key_var = match backend {
            LlmBackend::OpenAi => "OPENAI_API_KEY",
            LlmBackend::Anthropic => "ANTHROPIC_API_KEY",
        };
        let api_key = std::env::var(key_var)
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingEnvVar(key_var.to_string()))?;

        let model = std::env::var("FLOWLY_MODEL").unwrap_or_else(|_| "o4-mini".to_string());
        let endpoint = std::env::var("FLOWLY_LLM_ENDPOINT").ok();

        Ok(Self {
            data_dir,
            port,
            mode,
            llm: LlmConfig {
                backend,
                api_key,
                model,
                endpoint,
            },
        })
    }
}

fn parse_mode(value: &str) -> Result<Mode, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "serve" => Ok(Mode::Serve),
        "cli" => Ok(Mode::Cli),
        other => Err(ConfigError::InvalidValue {
            key: "FLOWLY_MODE".to_string(),
            message: format!("expected 'serve' or 'cli', got {other:?}"),
        }),
    }
}

fn parse_backend(value: &str) -> Result<LlmBackend, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "openai" => Ok(LlmBackend::OpenAi),
        "anthropic" => Ok(LlmBackend::Anthropic),
        other => Err(ConfigError::InvalidValue {
            key: "FLOWLY_LLM_BACKEND".to_string(),
            message: format!("expected 'openai' or 'anthropic', got {other:?}"),
        }),
    }
}
