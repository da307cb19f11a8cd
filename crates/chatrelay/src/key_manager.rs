use keyring::Entry;
use serde::Deserialize;
use std::env;
use thiserror::Error;
#[cfg(test)]
use mockall::automock;
#[cfg(test)]
use mockall::predicate::*;

pub const KEYRING_SERVICE: &str = "chatrelay";

#[derive(Error, Debug)]
pub enum KeyManagerError {
    #[error("Failed to access keyring: {0}")]
    KeyringAccess(String),

    #[error("Failed to access environment variable: {0}")]
    EnvVarAccess(String),
}

impl From<keyring::Error> for KeyManagerError {
    fn from(err: keyring::Error) -> Self {
        KeyManagerError::KeyringAccess(err.to_string())
    }
}

impl From<env::VarError> for KeyManagerError {
    fn from(err: env::VarError) -> Self {
        KeyManagerError::EnvVarAccess(err.to_string())
    }
}

#[cfg_attr(test, automock)]
pub trait Keyring: Send + Sync {
    fn get_password(&self) -> Result<String, KeyManagerError>;
}

#[cfg_attr(test, automock)]
pub trait Environment: Send + Sync {
    fn get_var(&self, key: &str) -> Result<String, env::VarError>;
}

pub struct RealEnvironment;

impl Environment for RealEnvironment {
    fn get_var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

impl Keyring for Entry {
    fn get_password(&self) -> Result<String, KeyManagerError> {
        self.get_password().map_err(KeyManagerError::from)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyRetrievalStrategy {
    /// Only look in environment variables
    EnvironmentOnly,
    /// Only look in system keyring
    KeyringOnly,
    /// Try keyring first, then environment variables
    #[default]
    Both,
}

pub fn get_api_key_default(
    api_key_name: &str,
    strategy: KeyRetrievalStrategy,
) -> Result<String, KeyManagerError> {
    let env = RealEnvironment;
    let kr = Entry::new(KEYRING_SERVICE, api_key_name)?;
    get_api_key(api_key_name, strategy, &kr, &env)
}

pub fn get_api_key(
    api_key_name: &str,
    strategy: KeyRetrievalStrategy,
    keyring: &impl Keyring,
    env: &impl Environment,
) -> Result<String, KeyManagerError> {
    match strategy {
        KeyRetrievalStrategy::EnvironmentOnly => {
            env.get_var(api_key_name).map_err(KeyManagerError::from)
        }
        KeyRetrievalStrategy::KeyringOnly => keyring.get_password(),
        KeyRetrievalStrategy::Both => match keyring.get_password() {
            Ok(key) => Ok(key),
            Err(e) => {
                tracing::debug!("Could not retrieve {} from keyring: {}", api_key_name, e);
                env.get_var(api_key_name).map_err(|_| {
                    KeyManagerError::EnvVarAccess(format!(
                        "Could not find {} key in keyring or environment variables",
                        api_key_name
                    ))
                })
            }
        },
    }
}
