use crate::error::ConfigError;
use chatrelay::key_manager::KeyRetrievalStrategy;
use chatrelay::providers::configs::{ANTHROPIC_HOST, ANTHROPIC_VERSION, DEFAULT_TIMEOUT};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_PATH_VAR: &str = "CHATRELAY_CONFIG";

#[derive(Debug, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerSettings {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| ConfigError::Invalid(format!("server address: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
pub struct ProviderSettings {
    #[serde(default = "default_provider_host")]
    pub host: String,
    /// When unset the key is looked up through the key manager on every request
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub key_strategy: KeyRetrievalStrategy,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            host: default_provider_host(),
            api_key: None,
            version: default_version(),
            timeout_secs: default_timeout_secs(),
            key_strategy: KeyRetrievalStrategy::default(),
        }
    }
}

impl ProviderSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub provider: ProviderSettings,
    /// Max output tokens per model, layered over the built in table
    #[serde(default)]
    pub limits: HashMap<String, u32>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let (path, required) = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => (Some(PathBuf::from(path)), true),
            Err(_) => (default_config_path(), false),
        };
        Self::load_and_validate(path, required)
    }

    fn load_and_validate(path: Option<PathBuf>, required: bool) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port())?
            .set_default("provider.host", default_provider_host())?
            .set_default("provider.version", default_version())?
            .set_default("provider.timeout_secs", default_timeout_secs())?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path.as_path()).required(required));
        }

        let config = builder
            // Layer on the environment variables
            .add_source(
                Environment::with_prefix("CHATRELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize().map_err(|err| {
            tracing::debug!("Configuration error: {:?}", &err);
            ConfigError::from(err)
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chatrelay").join("config.toml"))
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_provider_host() -> String {
    ANTHROPIC_HOST.to_string()
}

fn default_version() -> String {
    ANTHROPIC_VERSION.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::io::Write;

    fn clean_env() {
        for (key, _) in env::vars() {
            if key.starts_with("CHATRELAY_") {
                env::remove_var(&key);
            }
        }
    }

    #[test]
    #[serial]
    fn test_default_settings() {
        clean_env();

        let settings = Settings::load_and_validate(None, false).unwrap();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.provider.host, "https://api.anthropic.com");
        assert_eq!(settings.provider.api_key, None);
        assert_eq!(settings.provider.version, "2023-06-01");
        assert_eq!(settings.provider.timeout(), Duration::from_secs(600));
        assert_eq!(settings.provider.key_strategy, KeyRetrievalStrategy::Both);
        assert!(settings.limits.is_empty());
    }

    #[test]
    #[serial]
    fn test_environment_override() {
        clean_env();
        env::set_var("CHATRELAY_SERVER__PORT", "8080");
        env::set_var("CHATRELAY_PROVIDER__API_KEY", "sk-ant-test");
        env::set_var("CHATRELAY_PROVIDER__HOST", "http://localhost:9000");
        env::set_var("CHATRELAY_PROVIDER__TIMEOUT_SECS", "30");
        env::set_var("CHATRELAY_PROVIDER__KEY_STRATEGY", "environment_only");

        let settings = Settings::load_and_validate(None, false).unwrap();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.provider.api_key.as_deref(), Some("sk-ant-test"));
        assert_eq!(settings.provider.host, "http://localhost:9000");
        assert_eq!(settings.provider.timeout(), Duration::from_secs(30));
        assert_eq!(
            settings.provider.key_strategy,
            KeyRetrievalStrategy::EnvironmentOnly
        );

        clean_env();
    }

    #[test]
    #[serial]
    fn test_config_file_with_limits() {
        clean_env();
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
[server]
port = 4000

[limits]
"claude-3-5-sonnet-20240620" = 8192
"#
        )
        .unwrap();

        let settings = Settings::load_and_validate(Some(file.path().to_path_buf()), true).unwrap();
        assert_eq!(settings.server.port, 4000);
        assert_eq!(settings.limits.get("claude-3-5-sonnet-20240620"), Some(&8192));
    }

    #[test]
    #[serial]
    fn test_missing_required_file_is_an_error() {
        clean_env();
        let result = Settings::load_and_validate(Some(PathBuf::from("/nonexistent/chatrelay.toml")), true);
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_missing_optional_file_is_ignored() {
        clean_env();
        let settings =
            Settings::load_and_validate(Some(PathBuf::from("/nonexistent/chatrelay.toml")), false)
                .unwrap();
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    #[serial]
    fn test_invalid_value_is_an_error() {
        clean_env();
        env::set_var("CHATRELAY_SERVER__PORT", "not-a-port");

        let result = Settings::load_and_validate(None, false);
        assert!(matches!(result, Err(ConfigError::Other(_))));

        clean_env();
    }

    #[test]
    fn test_socket_addr_conversion() {
        let server_settings = ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 3000,
        };
        let addr = server_settings.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "127.0.0.1:3000");

        let invalid = ServerSettings {
            host: "not a host".to_string(),
            port: 3000,
        };
        assert!(matches!(invalid.socket_addr(), Err(ConfigError::Invalid(_))));
    }
}
