//! Structured logging setup.
//!
//! Thin helpers over `tracing-subscriber`: filter-directive construction from
//! [`LoggingConfig`](crate::config::LoggingConfig) and request id generation
//! for correlating API log lines.

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level and
/// any component-specific log levels configured in the LoggingConfig, e.g.
/// `"info,tokenlens::pricing=debug"`.
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",tokenlens::{}={}", component, level));
        }
    }

    filter_str
}

/// Generate a short request id for log correlation.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()[..8].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_only() {
        let config = LoggingConfig::default();
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn test_filter_directives_with_components() {
        let mut component_levels = HashMap::new();
        component_levels.insert("pricing".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "warn".to_string(),
            component_levels: Some(component_levels),
            ..LoggingConfig::default()
        };

        assert_eq!(
            build_filter_directives(&config),
            "warn,tokenlens::pricing=debug"
        );
    }

    #[test]
    fn test_request_id_length() {
        let id = generate_request_id();
        assert_eq!(id.len(), 8);
    }
}
