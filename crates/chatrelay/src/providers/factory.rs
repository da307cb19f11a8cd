use std::time::Duration;

use super::{
    anthropic::AnthropicProvider,
    base::{Provider, ProviderFactory},
    configs::{AnthropicProviderConfig, ANTHROPIC_HOST, ANTHROPIC_VERSION, DEFAULT_TIMEOUT},
};
use crate::errors::ProviderError;

pub const ANTHROPIC: &str = "Anthropic";

/// Builds an [`AnthropicProvider`] per request from the caller's key
#[derive(Debug, Clone)]
pub struct AnthropicFactory {
    host: String,
    version: String,
    timeout: Duration,
}

impl Default for AnthropicFactory {
    fn default() -> Self {
        Self {
            host: ANTHROPIC_HOST.to_string(),
            version: ANTHROPIC_VERSION.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AnthropicFactory {
    pub fn new<S: Into<String>, T: Into<String>>(host: S, version: T, timeout: Duration) -> Self {
        Self {
            host: host.into(),
            version: version.into(),
            timeout,
        }
    }
}

impl ProviderFactory for AnthropicFactory {
    fn name(&self) -> &str {
        ANTHROPIC
    }

    fn build(&self, api_key: &str) -> Result<Box<dyn Provider>, ProviderError> {
        let config = AnthropicProviderConfig {
            host: self.host.clone(),
            api_key: api_key.to_string(),
            version: self.version.clone(),
            timeout: self.timeout,
        };
        Ok(Box::new(AnthropicProvider::new(config)?))
    }
}
