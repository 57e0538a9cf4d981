//! Configuration loading from disk or from an options object.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RouterConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid options object: {0}")]
    Options(#[from] serde_json::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RouterConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = RouterConfig::from_toml_str(&content)?;

    tracing::debug!(path = ?path, routes = config.routes.len(), "Configuration loaded");
    Ok(config)
}

impl RouterConfig {
    /// Parse and validate TOML configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RouterConfig = toml::from_str(content)?;
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Parse and validate an options object such as
    /// `{ "continueOnExceptions": true }`.
    pub fn from_json(options: &serde_json::Value) -> Result<Self, ConfigError> {
        let config = RouterConfig::deserialize_json(options)?;
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    fn deserialize_json(options: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if options.is_null() {
            return Ok(Self::default());
        }
        serde_json::from_value(options.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::from_toml_str("").unwrap();
        assert!(!config.continue_on_exceptions);
        assert_eq!(config.observability.log_level, "info");
        assert!(config.templates.base_url.is_none());
        assert!(config.routes.is_empty());
    }

    #[test]
    fn test_toml() {
        let config = RouterConfig::from_toml_str(
            r#"
            continue_on_exceptions = true

            [templates]
            base_url = "https://app.example.com"

            [[routes]]
            pattern = "/users/:id"
            name = "user"

            [[routes]]
            pattern = "/about"
            "#,
        )
        .unwrap();

        assert!(config.continue_on_exceptions);
        assert_eq!(config.templates.base_url.as_deref(), Some("https://app.example.com"));
        assert_eq!(config.routes.len(), 2);
        assert_eq!(config.routes[0].name.as_deref(), Some("user"));
    }

    #[test]
    fn test_options_object() {
        let config = RouterConfig::from_json(&json!({ "continueOnExceptions": true })).unwrap();
        assert!(config.continue_on_exceptions);

        let config = RouterConfig::from_json(&serde_json::Value::Null).unwrap();
        assert!(!config.continue_on_exceptions);
    }

    #[test]
    fn test_options_object_wrong_type() {
        let err = RouterConfig::from_json(&json!({ "continueOnExceptions": "yes" })).unwrap_err();
        assert!(matches!(err, ConfigError::Options(_)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = RouterConfig::from_toml_str(
            r#"
            [templates]
            base_url = "not a url"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref errors) if errors.len() == 1));
        assert!(err.to_string().starts_with("Validation failed: "));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/router.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
