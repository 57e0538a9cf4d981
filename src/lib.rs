//! Client-side single-page-application router.
//!
//! Intercepts in-app link navigation, matches paths (with `:param`
//! segments) against registered routes, runs middleware chains and a
//! terminal handler, and keeps the host's history in sync.

pub mod config;
pub mod dispatch;
pub mod host;
pub mod navigation;
pub mod observability;
pub mod router;
pub mod routing;
pub mod templates;

pub use config::RouterConfig;
pub use dispatch::{DispatchOutcome, MiddlewareError};
pub use host::{Host, MemoryHost};
pub use navigation::{ClickDisposition, ClickTarget, NavigationOutcome};
pub use router::{Router, RouterError};
pub use routing::{RouteDefinition, RouteMatch};
