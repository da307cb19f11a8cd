use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_ERROR_STATUS: u16 = 500;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0} API Key not found")]
    MissingCredential(String),

    #[error("Failed to load server profile: {0}")]
    Profile(String),

    #[error("Provider returned status {status}")]
    Api {
        status: u16,
        /// `error.message` of the response body
        detail: Option<String>,
        /// top level `message` of the response body, or the raw body when it is not json
        message: Option<String>,
    },

    #[error("Request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Provider stream failed: {0}")]
    Stream(String),
}

impl ProviderError {
    /// The provider's own error message nested under `error`
    pub fn nested_message(&self) -> Option<&str> {
        match self {
            ProviderError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// The top level message carried by the failure, if it has one worth showing
    pub fn top_level_message(&self) -> Option<String> {
        match self {
            ProviderError::MissingCredential(_) | ProviderError::Profile(_) => Some(self.to_string()),
            ProviderError::Api { message, .. } => message.clone(),
            ProviderError::Stream(message) => Some(message.clone()),
            ProviderError::Transport(_) => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ProviderError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Uniform error body returned when a chat request cannot be started
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub message: String,
    #[serde(skip)]
    pub status: u16,
}

impl ErrorEnvelope {
    pub fn new<S: Into<String>>(message: S, status: u16) -> Self {
        Self {
            message: message.into(),
            status,
        }
    }

    /// Normalize a provider failure
    ///
    /// message: nested provider message, then top level message, then a fixed fallback.
    /// status: provider status, then 500.
    /// The message is then rewritten into user guidance for a missing or rejected key.
    pub fn from_provider_error(error: &ProviderError, provider: &str) -> Self {
        let message = error
            .nested_message()
            .map(str::to_string)
            .filter(|m| !m.is_empty())
            .or_else(|| error.top_level_message().filter(|m| !m.is_empty()))
            .unwrap_or_else(|| unexpected_error_message(provider));

        let status = error
            .status()
            .filter(|s| *s != 0)
            .unwrap_or(DEFAULT_ERROR_STATUS);

        Self::new(rewrite_message(message, status, provider), status)
    }
}

fn unexpected_error_message(provider: &str) -> String {
    format!("An unexpected error occurred with {}.", provider)
}

pub fn missing_key_message(provider: &str) -> String {
    format!(
        "{} API Key not found. Please set it in your profile settings.",
        provider
    )
}

pub fn incorrect_key_message(provider: &str) -> String {
    format!(
        "{} API Key is incorrect. Please fix it in your profile settings.",
        provider
    )
}

/// First match wins: a "not found" key message, then any 401, otherwise the message is kept
fn rewrite_message(message: String, status: u16, provider: &str) -> String {
    if message.to_lowercase().contains("api key not found") {
        missing_key_message(provider)
    } else if status == 401 {
        incorrect_key_message(provider)
    } else {
        message
    }
}
