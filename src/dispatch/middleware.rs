//! Middleware and handler traits.

use thiserror::Error;

use crate::routing::RouteMatch;

/// Failure raised by a middleware.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MiddlewareError {
    /// A guard refused the navigation.
    #[error("navigation denied: {0}")]
    Denied(String),

    /// Any other middleware failure.
    #[error("{0}")]
    Failed(String),
}

impl MiddlewareError {
    pub fn denied(reason: impl Into<String>) -> Self {
        Self::Denied(reason.into())
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }
}

/// A step run before the terminal handler of a route.
pub trait Middleware: Send + Sync {
    fn call(&self, route: &RouteMatch) -> Result<(), MiddlewareError>;
}

impl<F> Middleware for F
where
    F: Fn(&RouteMatch) -> Result<(), MiddlewareError> + Send + Sync,
{
    fn call(&self, route: &RouteMatch) -> Result<(), MiddlewareError> {
        self(route)
    }
}

/// The terminal callable of a route.
pub trait Handler: Send + Sync {
    fn handle(&self, route: &RouteMatch);
}

impl<F> Handler for F
where
    F: Fn(&RouteMatch) + Send + Sync,
{
    fn handle(&self, route: &RouteMatch) {
        self(route)
    }
}
