//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Template base URL must be an absolute http(s) URL
//! - Log level must be a known level
//! - Declared route patterns must be non-empty and unique
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>

use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::config::schema::RouterConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// A single semantic problem in a configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("templates.base_url '{0}' is not an absolute http(s) URL")]
    InvalidBaseUrl(String),

    #[error("observability.log_level '{0}' is not a known level")]
    InvalidLogLevel(String),

    #[error("routes[{0}] has an empty pattern")]
    EmptyPattern(usize),

    #[error("route pattern '{0}' is declared more than once")]
    DuplicatePattern(String),
}

/// Check `config` for semantic errors.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Some(base_url) = &config.templates.base_url {
        let valid = Url::parse(base_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !valid {
            errors.push(ValidationError::InvalidBaseUrl(base_url.clone()));
        }
    }

    let level = config.observability.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::InvalidLogLevel(
            config.observability.log_level.clone(),
        ));
    }

    let mut seen = HashSet::new();
    for (i, route) in config.routes.iter().enumerate() {
        if route.pattern.is_empty() {
            errors.push(ValidationError::EmptyPattern(i));
        } else if !seen.insert(route.pattern.as_str()) {
            errors.push(ValidationError::DuplicatePattern(route.pattern.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
