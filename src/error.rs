use std::io;

use thiserror::Error;

use crate::critique::ValidationError;

/// Error types that can occur when talking to the remote model.
#[derive(Debug, Error)]
pub enum LLMError {
    /// HTTP request/response errors
    #[error("HTTP error: {0}")]
    HttpError(String),
    /// Authentication and authorization errors
    #[error("Auth error: {0}")]
    AuthError(String),
    /// Invalid request parameters or format
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Errors returned by the LLM provider
    #[error("Provider error: {0}")]
    ProviderError(String),
    /// API response parsing or format error
    #[error("Response format error: {message}. Raw response: {raw_response}")]
    ResponseFormatError {
        message: String,
        raw_response: String,
    },
}

/// Converts reqwest HTTP errors into LlmErrors
impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::HttpError(err.to_string())
    }
}

/// Top-level failures of a critique session.
///
/// A reply without section markers is not an error: it surfaces as an
/// evaluation with no answer.
#[derive(Debug, Error)]
pub enum WhispererError {
    /// The prompt was rejected before any remote call was made.
    #[error("{0}")]
    InvalidInput(#[from] ValidationError),
    /// The remote model call failed; history is unchanged.
    #[error("remote call failed: {0}")]
    RemoteCall(#[from] LLMError),
    /// The persisted history file could not be parsed.
    #[error("malformed history at line {line}: {reason}")]
    MalformedHistory { line: u64, reason: String },
    /// Reading or writing the history file failed.
    #[error("history IO error: {0}")]
    Io(#[from] io::Error),
    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl WhispererError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        WhispererError::MalformedHistory {
            line,
            reason: reason.into(),
        }
    }
}
