use std::sync::Arc;

use chatrelay::{
    limits::ChatSettingLimits,
    profile::{KeyManagerProfileStore, ProfileStore, ServerProfile, StaticProfileStore},
    providers::factory::AnthropicFactory,
    relay::Relay,
};

use crate::configuration::Settings;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub relay: Relay,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self { relay }
    }

    pub fn from_settings(settings: Settings) -> Self {
        let provider = settings.provider;
        let timeout = provider.timeout();

        let profiles: Arc<dyn ProfileStore> = match provider.api_key {
            Some(key) => Arc::new(StaticProfileStore::new(ServerProfile {
                anthropic_api_key: Some(key),
            })),
            None => Arc::new(KeyManagerProfileStore::new(provider.key_strategy)),
        };

        let relay = Relay::new(
            profiles,
            Arc::new(ChatSettingLimits::with_overrides(settings.limits)),
            Arc::new(AnthropicFactory::new(provider.host, provider.version, timeout)),
        );
        Self::new(relay)
    }
}
