//! Configuration module for Tokenlens
//!
//! Provides layered configuration loading from files, environment variables,
//! and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`TOKENLENS_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use tokenlens::config::TokenlensConfig;
//!
//! // Load defaults
//! let config = TokenlensConfig::default();
//! assert_eq!(config.server.port, 3001);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: TokenlensConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod auth;
pub mod error;
pub mod logging;
pub mod server;
pub mod store;

pub use auth::AuthConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use store::StoreConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the Tokenlens server.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TokenlensConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Dashboard login credentials and session settings
    pub auth: AuthConfig,
    /// Document store settings
    pub store: StoreConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl TokenlensConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports TOKENLENS_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("TOKENLENS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("TOKENLENS_HOST") {
            self.server.host = host;
        }

        if let Ok(username) = std::env::var("TOKENLENS_ADMIN_USERNAME") {
            self.auth.admin_username = username;
        }
        if let Ok(password) = std::env::var("TOKENLENS_ADMIN_PASSWORD") {
            self.auth.admin_password = password;
        }

        if let Ok(seed) = std::env::var("TOKENLENS_SEED") {
            self.store.seed_path = Some(seed.into());
        }

        if let Ok(level) = std::env::var("TOKENLENS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TOKENLENS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.auth.admin_username.is_empty() {
            return Err(ConfigError::Validation {
                field: "auth.admin_username".to_string(),
                message: "username cannot be empty".to_string(),
            });
        }
        if self.auth.admin_password.is_empty() {
            return Err(ConfigError::Validation {
                field: "auth.admin_password".to_string(),
                message: "password cannot be empty".to_string(),
            });
        }
        if self.auth.session_ttl_hours == 0 {
            return Err(ConfigError::Validation {
                field: "auth.session_ttl_hours".to_string(),
                message: "session lifetime must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}
