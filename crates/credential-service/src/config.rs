//! Configuration for the credential service.

use anyhow::{bail, Context, Result};
use jsonwebtoken::Algorithm;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

/// Service configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Token signing configuration
    pub auth: AuthConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// Symmetric key used to sign tokens
    pub signing_key: SecretString,

    /// Signing algorithm (HMAC family)
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,

    /// Token lifetime
    #[serde(default = "default_token_ttl", with = "humantime_serde")]
    pub token_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_listen_addr() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    8080
}

fn default_algorithm() -> Algorithm {
    Algorithm::HS256
}

fn default_token_ttl() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_log_level() -> String {
    "info".into()
}

impl AuthConfig {
    /// Raw signing key bytes.
    pub fn signing_key_bytes(&self) -> &[u8] {
        self.signing_key.expose_secret().as_bytes()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.auth.signing_key.expose_secret().is_empty() {
            bail!("AUTH__SIGNING_KEY must not be empty");
        }
        if !matches!(
            self.auth.algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            bail!(
                "AUTH__ALGORITHM must be HS256, HS384 or HS512, got {:?}",
                self.auth.algorithm
            );
        }
        if self.auth.token_ttl.is_zero() {
            bail!("AUTH__TOKEN_TTL must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_json(value: serde_json::Value) -> Config {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = from_json(serde_json::json!({
            "auth": { "signing_key": "mi_clave_secreta" }
        }));

        assert_eq!(config.server.listen_addr, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.algorithm, Algorithm::HS256);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(86_400));
        assert_eq!(config.log.level, "info");
        assert_eq!(config.auth.signing_key_bytes(), b"mi_clave_secreta");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = from_json(serde_json::json!({
            "server": { "listen_addr": "127.0.0.1", "port": 9000 },
            "auth": { "signing_key": "k", "algorithm": "HS512", "token_ttl": "1h 30m" },
            "log": { "level": "debug" }
        }));

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.auth.algorithm, Algorithm::HS512);
        assert_eq!(config.auth.token_ttl, Duration::from_secs(5400));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_signing_key_required() {
        let result = serde_json::from_value::<Config>(serde_json::json!({}));
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_signing_key_rejected() {
        let config = from_json(serde_json::json!({ "auth": { "signing_key": "" } }));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_hmac_algorithm_rejected() {
        for algorithm in ["RS256", "ES256", "EdDSA"] {
            let config = from_json(serde_json::json!({
                "auth": { "signing_key": "k", "algorithm": algorithm }
            }));
            assert!(config.validate().is_err(), "{}", algorithm);
        }

        for algorithm in ["HS256", "HS384", "HS512"] {
            let config = from_json(serde_json::json!({
                "auth": { "signing_key": "k", "algorithm": algorithm }
            }));
            assert!(config.validate().is_ok(), "{}", algorithm);
        }
    }

    #[test]
    fn test_zero_ttl_rejected() {
        let config = from_json(serde_json::json!({
            "auth": { "signing_key": "k", "token_ttl": "0s" }
        }));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let config = from_json(serde_json::json!({
            "auth": { "signing_key": "super-secret-value" }
        }));
        assert!(!format!("{:?}", config).contains("super-secret-value"));
    }
}
