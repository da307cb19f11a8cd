use std::sync::Arc;

use crate::errors::{ErrorEnvelope, ProviderError};
use crate::limits::ModelLimits;
use crate::models::chat::ChatRequest;
use crate::profile::{check_api_key, ProfileStore};
use crate::providers::base::{ProviderFactory, TokenStream};
use crate::providers::types::ProviderRequest;
use crate::translate::translate;

/// Start a streaming request with the given key
///
/// Any failure up to and including the initiating call becomes one envelope. The returned
/// stream is untouched, errors it yields later are not normalized.
pub async fn relay(
    request: &ProviderRequest,
    api_key: &str,
    factory: &dyn ProviderFactory,
) -> Result<TokenStream, ErrorEnvelope> {
    start(request, api_key, factory)
        .await
        .map_err(|error| normalize(&error, factory.name()))
}

async fn start(
    request: &ProviderRequest,
    api_key: &str,
    factory: &dyn ProviderFactory,
) -> Result<TokenStream, ProviderError> {
    let provider = factory.build(api_key)?;
    provider.stream(request).await
}

fn normalize(error: &ProviderError, provider: &str) -> ErrorEnvelope {
    tracing::error!("{} route error: {}", provider, error);
    ErrorEnvelope::from_provider_error(error, provider)
}

/// One chat invocation from profile lookup to the provider stream
///
/// Holds only immutable collaborators, every call is independent of the others.
#[derive(Clone)]
pub struct Relay {
    profiles: Arc<dyn ProfileStore>,
    limits: Arc<dyn ModelLimits>,
    factory: Arc<dyn ProviderFactory>,
}

impl Relay {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        limits: Arc<dyn ModelLimits>,
        factory: Arc<dyn ProviderFactory>,
    ) -> Self {
        Self {
            profiles,
            limits,
            factory,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.factory.name()
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<TokenStream, ErrorEnvelope> {
        let provider = self.factory.name();

        let profile = self
            .profiles
            .server_profile()
            .await
            .map_err(|e| normalize(&ProviderError::from(e), provider))?;
        let api_key = check_api_key(profile.anthropic_api_key.as_deref(), provider)
            .map_err(|e| normalize(&e, provider))?;

        let payload = translate(&request.messages, &request.chat_settings, self.limits.as_ref());
        tracing::info!(
            model = %payload.model,
            turns = payload.messages.len(),
            max_tokens = payload.max_tokens,
            "relaying chat to {}",
            provider
        );

        relay(&payload, api_key, self.factory.as_ref()).await
    }
}
