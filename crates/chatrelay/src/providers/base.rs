use async_trait::async_trait;
use futures::stream::BoxStream;

use super::types::ProviderRequest;
use crate::errors::ProviderError;

/// Text tokens as they arrive from the provider
pub type TokenStream = BoxStream<'static, Result<String, ProviderError>>;

/// Base trait for streaming LLM clients
#[async_trait]
pub trait Provider: Send + Sync {
    /// Start a streaming completion
    ///
    /// Failures to start the request are returned here. Failures after the first byte are
    /// yielded by the stream itself.
    async fn stream(&self, request: &ProviderRequest) -> Result<TokenStream, ProviderError>;
}

/// Builds a provider client for one request's credentials
pub trait ProviderFactory: Send + Sync {
    /// Display name used in user facing messages, e.g. `Anthropic`
    fn name(&self) -> &str;

    fn build(&self, api_key: &str) -> Result<Box<dyn Provider>, ProviderError>;
}
