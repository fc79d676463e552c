//! Configuration management for RAX Gate
//!
//! Values come from built-in defaults, an optional `config.toml` and
//! `RAX_GATE_*` environment variables, later sources winning.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::session::io::DEFAULT_MAX_LINE_LENGTH;

/// Complete console configuration
#[derive(Debug, Deserialize, Clone)]
pub struct GateConfig {
    /// IP address the console listens on
    /// Environment: RAX_GATE_BIND_ADDRESS
    pub bind_address: String,

    /// TCP port of the console
    /// Environment: RAX_GATE_PORT
    pub port: u16,

    /// Maximum concurrent sessions
    /// Environment: RAX_GATE_MAX_SESSIONS
    pub max_sessions: usize,

    /// Seconds to wait for one answer before dropping the session (0 = forever)
    pub prompt_timeout_secs: u64,

    /// Longest answer line a session may send, in bytes
    /// Environment: RAX_GATE_MAX_LINE_LENGTH
    pub max_line_length: usize,

    /// JSON file holding the user registry (empty = memory only)
    pub users_file: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 2222,
            max_sessions: 10,
            prompt_timeout_secs: 300,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            users_file: "users.json".to_string(),
        }
    }
}

impl GateConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = GateConfig::default();

        // Docker production path, then the local development file
        let config = Config::builder()
            .set_default("bind_address", defaults.bind_address)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("max_sessions", defaults.max_sessions as i64)?
            .set_default("prompt_timeout_secs", defaults.prompt_timeout_secs as i64)?
            .set_default("max_line_length", defaults.max_line_length as i64)?
            .set_default("users_file", defaults.users_file)?
            .add_source(File::with_name("rax-gate/config").required(false))
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("RAX_GATE").try_parsing(true))
            .build()?
            .try_deserialize::<GateConfig>()?;

        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.trim().is_empty() {
            return Err(ConfigError::Message("bind_address cannot be empty".into()));
        }

        if self.port == 0 {
            return Err(ConfigError::Message("port cannot be 0".into()));
        }

        if self.max_sessions == 0 {
            return Err(ConfigError::Message(
                "max_sessions must be greater than 0".into(),
            ));
        }

        if self.max_line_length == 0 {
            return Err(ConfigError::Message(
                "max_line_length must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the prompt timeout, `None` when disabled
    pub fn prompt_timeout(&self) -> Option<Duration> {
        (self.prompt_timeout_secs > 0).then(|| Duration::from_secs(self.prompt_timeout_secs))
    }

    /// Get the users file path, `None` for a memory-only registry
    pub fn users_path(&self) -> Option<PathBuf> {
        let trimmed = self.users_file.trim();
        (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
    }
}
