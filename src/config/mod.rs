//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) or options object (JSON)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → RouterConfig (validated, immutable)
//!     → handed to Router::new
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ObservabilityConfig, RouteDeclaration, RouterConfig, TemplateConfig};
pub use validation::{validate_config, ValidationError};
