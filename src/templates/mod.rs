//! Template registry subsystem.
//!
//! # Data Flow
//! ```text
//! template(name, source)
//!     → source.rs (classify: literal HTML / remote URL / selector)
//!     → registry.rs (store now, or spawn fetch.rs for remote sources)
//!
//! render(name, selector, values)
//!     → registry.rs (lookup, `{{ key }}` substitution)
//!     → Host::set_inner_html
//! ```
//!
//! # Design Decisions
//! - Store is an `Arc<DashMap>` so spawned fetches insert without locking the router
//! - Remote loads report through `PendingTemplate`, never an unobserved failure
//! - Rendering replaces the target element's content wholesale

pub mod fetch;
pub mod registry;
pub mod source;

use thiserror::Error;

pub use fetch::{HttpTemplateFetcher, PendingTemplate, TemplateFetcher};
pub use registry::{substitute, TemplateRegistration, TemplateRegistry};
pub use source::TemplateSource;

/// Errors raised while registering, loading or rendering templates.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("Template source must be HTML, a URL, or a valid selector.")]
    EmptySource,

    #[error("Template not registered: {0}")]
    NotRegistered(String),

    #[error("Element not found from selector: {0}")]
    ElementNotFound(String),

    #[error("Invalid template URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Fetching template from {url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("Fetching template from {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    #[error("No async runtime available to fetch template '{0}'")]
    NoRuntime(String),

    #[error("Fetch task for template '{0}' did not complete")]
    TaskFailed(String),
}
