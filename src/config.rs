//! Configuration management for the cloudstash server
//!
//! Loads settings from config.toml with environment overrides and validates
//! them before the server starts.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Complete server configuration, loaded once at startup
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// IP address to bind the command connection
    pub bind_address: String,

    /// Port for the command connection
    pub port: u16,

    /// Flat directory holding uploaded bytes and generated notes
    pub downloads_dir: String,

    /// JSON document backing the user directory
    pub user_db_path: String,

    /// JSON document backing the file catalog
    pub file_db_path: String,

    /// Maximum concurrent client sessions
    pub max_clients: usize,

    /// Maximum accepted command line length
    pub max_command_length: usize,

    /// Shared secret for the ADMIN command
    pub admin_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 2323,
            downloads_dir: "downloads".to_string(),
            user_db_path: "users.json".to_string(),
            file_db_path: "file_db.json".to_string(),
            max_clients: 16,
            max_command_length: 1024,
            admin_secret: "secret123".to_string(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config.toml with environment overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        // Try production path first, then development path
        let config_paths = vec![
            "cloudstash/config", // Docker production: /app/cloudstash/config.toml
            "config",            // Local development: ./config.toml
        ];

        let mut last_error = None;

        for config_path in &config_paths {
            match Config::builder()
                .add_source(File::with_name(config_path))
                .add_source(Environment::with_prefix("CLOUDSTASH").separator("_"))
                .build()
            {
                Ok(settings) => {
                    let config: ServerConfig = settings.try_deserialize()?;
                    config.validate()?;
                    return Ok(config);
                }
                Err(e) => {
                    last_error = Some(e);
                    continue;
                }
            }
        }

        // If both paths failed, panic with clear message
        panic!(
            "Failed to load config.toml from any location. Tried: {config_paths:?}. Last error: {last_error:?}"
        );
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("Port cannot be 0".into()));
        }

        if self.downloads_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "downloads_dir cannot be empty".into(),
            ));
        }

        if self.user_db_path.is_empty() || self.file_db_path.is_empty() {
            return Err(config::ConfigError::Message(
                "record store paths cannot be empty".into(),
            ));
        }

        if self.max_clients == 0 {
            return Err(config::ConfigError::Message(
                "max_clients must be greater than 0".into(),
            ));
        }

        if self.max_command_length < 64 {
            return Err(config::ConfigError::Message(
                "max_command_length must be at least 64".into(),
            ));
        }

        Ok(())
    }

    /// Get bind address and port as socket address
    pub fn control_socket(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Get the downloads directory as PathBuf
    pub fn downloads_path(&self) -> PathBuf {
        PathBuf::from(&self.downloads_dir)
    }
}
