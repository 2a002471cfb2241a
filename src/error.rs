//! Error types for Flowly.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Intake error: {0}")]
    Intake(#[from] IntakeError),

    #[error("Interview error: {0}")]
    Interview(#[from] InterviewError),

    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Form intake errors.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("Please enter at least one question")]
    NoQuestions,
}

/// Interview progression errors. All are recoverable: the caller reports
/// the message and leaves the interview where it was.
#[derive(Debug, thiserror::Error)]
pub enum InterviewError {
    #[error("Please write an answer")]
    EmptyReply,

    #[error("No question is awaiting an answer")]
    NoPendingQuestion,

    #[error("The interview is complete; only transcript export is available")]
    Complete,
}

/// LLM backend errors. Surfaced to the caller as retryable — no automatic
/// retry is performed anywhere.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Provider {provider} request failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    #[error("Invalid response from {provider}: {reason}")]
    InvalidResponse { provider: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Flat-file store errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Form not found: {0}")]
    FormNotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Flowly.
pub type Result<T> = std::result::Result<T, Error>;
