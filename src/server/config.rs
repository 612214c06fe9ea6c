//! Server configuration
//!
//! Loads and validates configuration from config.toml with environment
//! overrides. Every field has a compiled default so tests and development
//! runs need no config file.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::account::AccountDefaults;
use crate::auth::CredentialParams;

/// Complete server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// IP address to bind the command socket
    pub bind_address: String,

    /// Port for the command socket
    pub port: u16,

    /// Maximum concurrent connections
    pub max_clients: usize,

    /// Maximum command line length in bytes
    pub max_command_length: usize,

    /// Input limits
    pub max_display_name_length: usize,
    pub max_password_length: usize,

    /// Failed-login throttling: allowed failures per window
    pub login_attempt_limit: usize,
    pub login_attempt_window_secs: u64,

    /// Credential derivation parameters for newly registered accounts
    pub credentials: CredentialParams,

    /// Field values applied to newly created accounts
    pub account_defaults: AccountDefaults,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 7878,
            max_clients: 64,
            max_command_length: 512,
            max_display_name_length: 32,
            max_password_length: 128,
            login_attempt_limit: 5,
            login_attempt_window_secs: 60,
            credentials: CredentialParams::default(),
            account_defaults: AccountDefaults::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml (optional) with `SKYHOST_`
    /// environment overrides, falling back to compiled defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("SKYHOST").separator("__"))
            .build()?;

        let config: ServerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Bind address and port as a socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Failed-login throttle window as a Duration
    pub fn login_attempt_window(&self) -> Duration {
        Duration::from_secs(self.login_attempt_window_secs)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(config::ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.credentials.salt_size == 0
            || self.credentials.key_size == 0
            || self.credentials.iterations == 0
        {
            return Err(config::ConfigError::Message(
                "credential parameters must all be greater than 0".into(),
            ));
        }

        if self.login_attempt_limit == 0 || self.login_attempt_window_secs == 0 {
            return Err(config::ConfigError::Message(
                "login throttle parameters must be greater than 0".into(),
            ));
        }

        Ok(())
    }
}
