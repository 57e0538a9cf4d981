//! Navigation interception.
//!
//! # Responsibilities
//! - Decide which clicks the router takes over (in-app `<a href="/...">`)
//! - Describe what happened to an intercepted navigation
//!
//! # Design Decisions
//! - Only anchors with an `href` starting with `/` are intercepted
//! - Everything else passes through to default browser behavior
//! - The router itself (`crate::router`) wires these into dispatch

pub mod click;

pub use click::{ClickDisposition, ClickTarget, NavigationOutcome};
