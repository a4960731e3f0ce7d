//! Document store configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the in-memory store gets its initial data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Optional JSON snapshot ({"collection": [documents...]}) loaded at
    /// startup. Without it the store starts empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_defaults() {
        let config = StoreConfig::default();
        assert!(config.seed_path.is_none());
    }

    #[test]
    fn test_store_config_parse_toml() {
        let config: StoreConfig = toml::from_str(r#"seed_path = "fixtures/seed.json""#).unwrap();
        assert_eq!(config.seed_path, Some(PathBuf::from("fixtures/seed.json")));
    }
}
