//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (at startup):
//!     RouteDefinition (pattern, middlewares, handler)
//!     → route.rs (validate, split into segments)
//!     → table.rs (store in registration order)
//!
//! Navigation:
//!     URL path
//!     → matcher.rs (first compatible route, bind :params)
//!     → Return: RouteMatch or None
//! ```
//!
//! # Design Decisions
//! - Routes registered once, never removed
//! - First match wins, in registration order
//! - No match is a normal outcome, not an error

pub mod matcher;
pub mod route;
pub mod table;

pub use matcher::match_path;
pub use route::{RegistrationError, Route, RouteDefinition, RouteMatch, RouteParams};
pub use table::RouteTable;
