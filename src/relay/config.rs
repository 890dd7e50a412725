//! Relay configuration.
//!
//! Settings come from an optional TOML file and are then overridden by
//! `ZWSP_*` environment variables, so a deployment can keep one file and
//! tweak the broker address per host.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mode::Mode;
use crate::relay::error::RelayError;

/// Default receiver host.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default receiver port.
pub const DEFAULT_PORT: u16 = 1883;

/// Default topic encoded messages are published on.
pub const DEFAULT_TOPIC: &str = "zwsp";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "ZWSP_";

/// Configuration shared by the sender and the receiver.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RelayConfig {
    /// Host the receiver listens on and the sender connects to.
    pub host: String,

    /// TCP port.
    pub port: u16,

    /// Topic for encoded messages.
    pub topic: String,

    /// Username presented in the connect frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// Password presented in the connect frame.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Codec mode. Both ends must agree.
    pub mode: Mode,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            topic: DEFAULT_TOPIC.to_string(),
            username: None,
            password: None,
            mode: Mode::Zwsp,
        }
    }
}

impl RelayConfig {
    /// Loads a config from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, RelayError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RelayError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parses a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RelayError> {
        let config: Self =
            toml::from_str(content).map_err(|e| RelayError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the config as TOML.
    pub fn to_toml(&self) -> Result<String, RelayError> {
        toml::to_string_pretty(self).map_err(|e| RelayError::Config(e.to_string()))
    }

    /// Applies `ZWSP_*` overrides from the process environment.
    pub fn apply_env(self) -> Result<Self, RelayError> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Applies overrides from any variable lookup.
    ///
    /// Recognized keys: `HOST`, `PORT`, `TOPIC`, `USERNAME`, `PASSWORD`,
    /// `MODE`, each prefixed with [`ENV_PREFIX`].
    pub fn apply_vars<F>(mut self, lookup: F) -> Result<Self, RelayError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        if let Some(host) = var("HOST") {
            self.host = host;
        }
        if let Some(port) = var("PORT") {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| RelayError::Config(format!("Invalid port: {port}")))?;
        }
        if let Some(topic) = var("TOPIC") {
            self.topic = topic;
        }
        if let Some(username) = var("USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = var("PASSWORD") {
            self.password = Some(password);
        }
        if let Some(mode) = var("MODE") {
            self.mode = mode
                .parse()
                .map_err(|e: crate::mode::ParseModeError| RelayError::Config(e.to_string()))?;
        }

        self.validate()?;
        Ok(self)
    }

    /// Checks that credentials are complete: a password needs a username.
    pub fn validate(&self) -> Result<(), RelayError> {
        if self.password.is_some() && self.username.is_none() {
            return Err(RelayError::Config(
                "password is set without a username".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for binding or connecting.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Credentials, when a username is configured. A missing password is
    /// checked as the empty string.
    pub fn credentials(&self) -> Option<Credentials> {
        self.username.as_ref().map(|username| Credentials {
            username: username.clone(),
            password: self.password.clone().unwrap_or_default(),
        })
    }
}

/// Username and password checked on connect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
