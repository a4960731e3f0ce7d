//! Admin authentication configuration

use serde::{Deserialize, Serialize};

/// Credentials and session settings for the dashboard login.
///
/// The defaults are placeholders; deployments must override them via the
/// config file or `TOKENLENS_ADMIN_USERNAME` / `TOKENLENS_ADMIN_PASSWORD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub admin_username: String,
    pub admin_password: String,
    /// Session lifetime in hours.
    pub session_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            admin_username: "admin".to_string(),
            admin_password: "changeme".to_string(),
            session_ttl_hours: 24,
        }
    }
}
