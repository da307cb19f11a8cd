use async_trait::async_trait;
use thiserror::Error;

use crate::errors::ProviderError;
use crate::key_manager::{get_api_key_default, KeyRetrievalStrategy};

pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile unavailable: {0}")]
    Unavailable(String),
}

impl From<ProfileError> for ProviderError {
    fn from(err: ProfileError) -> Self {
        ProviderError::Profile(err.to_string())
    }
}

/// Credentials available to the server for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerProfile {
    pub anthropic_api_key: Option<String>,
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn server_profile(&self) -> Result<ServerProfile, ProfileError>;
}

/// A profile fixed at startup, usually from configuration
#[derive(Debug, Clone, Default)]
pub struct StaticProfileStore {
    profile: ServerProfile,
}

impl StaticProfileStore {
    pub fn new(profile: ServerProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl ProfileStore for StaticProfileStore {
    async fn server_profile(&self) -> Result<ServerProfile, ProfileError> {
        Ok(self.profile.clone())
    }
}

/// Reads the key through the key manager on every request, so a rotated key is picked up
#[derive(Debug, Clone, Default)]
pub struct KeyManagerProfileStore {
    strategy: KeyRetrievalStrategy,
}

impl KeyManagerProfileStore {
    pub fn new(strategy: KeyRetrievalStrategy) -> Self {
        Self { strategy }
    }
}

#[async_trait]
impl ProfileStore for KeyManagerProfileStore {
    async fn server_profile(&self) -> Result<ServerProfile, ProfileError> {
        let strategy = self.strategy;
        // keyring backends block, keep them off the runtime threads
        let key = tokio::task::spawn_blocking(move || get_api_key_default(ANTHROPIC_API_KEY, strategy))
            .await
            .map_err(|e| ProfileError::Unavailable(e.to_string()))?;

        let anthropic_api_key = match key {
            Ok(key) => Some(key),
            Err(e) => {
                tracing::debug!("No anthropic key available: {}", e);
                None
            }
        };
        Ok(ServerProfile { anthropic_api_key })
    }
}

/// Fail with a missing credential error unless a non-empty key is present
pub fn check_api_key<'a>(api_key: Option<&'a str>, provider: &str) -> Result<&'a str, ProviderError> {
    match api_key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(ProviderError::MissingCredential(provider.to_string())),
    }
}
