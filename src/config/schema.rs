//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files or a
//! JSON options object.

use serde::{Deserialize, Serialize};

/// Root configuration for a router.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RouterConfig {
    /// Keep running middlewares (and the handler) after a middleware fails.
    #[serde(alias = "continueOnExceptions")]
    pub continue_on_exceptions: bool,

    /// Template loading settings.
    pub templates: TemplateConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route patterns declared up front (used by the CLI).
    pub routes: Vec<RouteDeclaration>,
}

/// Template loading configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct TemplateConfig {
    /// Origin that relative template URLs (`/partials/x.html`) resolve against.
    #[serde(alias = "baseUrl")]
    pub base_url: Option<String>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(alias = "logLevel")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A route pattern declared in configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RouteDeclaration {
    /// Route pattern, e.g. `/users/:id`.
    pub pattern: String,

    /// Optional label shown in CLI output.
    #[serde(default)]
    pub name: Option<String>,
}
