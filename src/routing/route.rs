//! Route descriptors and match results.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::dispatch::{Handler, Middleware};

/// Errors raised while registering a route.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// The route pattern was empty.
    #[error("You must specify a path.")]
    MissingPath,

    /// Middlewares were supplied but no trailing handler.
    #[error("Could not get route handler for '{0}'.")]
    MissingHandler(String),
}

/// A registered route: pattern, middleware chain and terminal handler.
pub struct Route {
    pattern: String,
    segments: Vec<String>,
    middlewares: Vec<Arc<dyn Middleware>>,
    handler: Arc<dyn Handler>,
}

impl Route {
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern split on `/`, empty segments preserved.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn middlewares(&self) -> &[Arc<dyn Middleware>] {
        &self.middlewares
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// True if the pattern can bind parameters.
    pub fn is_parameterized(&self) -> bool {
        self.pattern.contains(':')
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .field("middlewares", &self.middlewares.len())
            .finish()
    }
}

/// Builder standing in for `route(pattern, ...middlewares, handler)`.
pub struct RouteDefinition {
    pattern: String,
    middlewares: Vec<Arc<dyn Middleware>>,
    handler: Option<Arc<dyn Handler>>,
}

impl RouteDefinition {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            middlewares: Vec::new(),
            handler: None,
        }
    }

    /// Append a middleware; middlewares run in the order they are added.
    pub fn middleware<M>(mut self, middleware: M) -> Self
    where
        M: Middleware + 'static,
    {
        self.middlewares.push(Arc::new(middleware));
        self
    }

    /// Set the terminal handler.
    pub fn handler<H>(mut self, handler: H) -> Self
    where
        H: Handler + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// A pattern with nothing attached to it.
    pub fn is_bare(&self) -> bool {
        self.middlewares.is_empty() && self.handler.is_none()
    }

    /// Validate and build the route.
    ///
    /// Returns `Ok(None)` for a bare declaration, which registers nothing.
    pub fn build(self) -> Result<Option<Route>, RegistrationError> {
        if self.pattern.is_empty() {
            return Err(RegistrationError::MissingPath);
        }
        if self.is_bare() {
            return Ok(None);
        }
        let handler = self
            .handler
            .ok_or_else(|| RegistrationError::MissingHandler(self.pattern.clone()))?;

        Ok(Some(Route {
            segments: self.pattern.split('/').map(str::to_string).collect(),
            pattern: self.pattern,
            middlewares: self.middlewares,
            handler,
        }))
    }
}

/// Named parameters bound from `:name` segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteParams(HashMap<String, String>);

impl RouteParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Result of resolving a URL against the route table.
///
/// Created per navigation and dropped once dispatch finishes.
#[derive(Debug, Clone)]
pub struct RouteMatch {
    route: Arc<Route>,
    params: RouteParams,
    url: String,
}

impl RouteMatch {
    pub fn new(route: Arc<Route>, params: RouteParams, url: impl Into<String>) -> Self {
        Self {
            route,
            params,
            url: url.into(),
        }
    }

    pub fn route(&self) -> &Arc<Route> {
        &self.route
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// The URL that was matched, as navigated to.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn summary(&self) -> MatchSummary {
        MatchSummary {
            pattern: self.route.pattern().to_string(),
            url: self.url.clone(),
            params: self.params.clone(),
        }
    }
}

/// Serializable view of a `RouteMatch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub pattern: String,
    pub url: String,
    pub params: RouteParams,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MiddlewareError;

    fn noop(_: &RouteMatch) {}

    fn pass(_: &RouteMatch) -> Result<(), MiddlewareError> {
        Ok(())
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let err = RouteDefinition::new("").handler(noop).build().unwrap_err();
        assert_eq!(err, RegistrationError::MissingPath);
    }

    #[test]
    fn test_bare_definition_builds_nothing() {
        assert!(RouteDefinition::new("/about").build().unwrap().is_none());
    }

    #[test]
    fn test_middleware_without_handler_rejected() {
        let err = RouteDefinition::new("/admin")
            .middleware(pass)
            .build()
            .unwrap_err();
        assert_eq!(err, RegistrationError::MissingHandler("/admin".into()));
    }

    #[test]
    fn test_segments_keep_empty_parts() {
        let route = RouteDefinition::new("/users/:id/")
            .handler(noop)
            .build()
            .unwrap()
            .unwrap();
        assert_eq!(route.segments(), &["", "users", ":id", ""]);
        assert!(route.is_parameterized());
    }

    #[test]
    fn test_summary_serializes_params() {
        let route = RouteDefinition::new("/users/:id").handler(noop).build().unwrap();
        let route = Arc::new(route.unwrap());
        let mut params = RouteParams::new();
        params.insert("id", "42");
        let m = RouteMatch::new(route, params, "/users/42");

        let json = serde_json::to_value(m.summary()).unwrap();
        assert_eq!(json["pattern"], "/users/:id");
        assert_eq!(json["params"]["id"], "42");
    }
}
