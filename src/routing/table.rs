//! Route table storage.
//!
//! # Design Decisions
//! - Vec keeps registration order for first-match iteration
//! - Pattern index makes re-registration replace in place
//! - Routes are `Arc`-shared so a `RouteMatch` outlives table borrows

use std::collections::HashMap;
use std::sync::Arc;

use super::route::Route;

/// Ordered table of registered routes, keyed by pattern.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Arc<Route>>,
    index: HashMap<String, usize>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `route`. A pattern registered twice keeps its first position
    /// and takes the newer descriptor.
    ///
    /// Returns `true` if an existing route was replaced.
    pub fn insert(&mut self, route: Route) -> bool {
        let route = Arc::new(route);
        match self.index.get(route.pattern()) {
            Some(&pos) => {
                self.routes[pos] = route;
                true
            }
            None => {
                self.index.insert(route.pattern().to_string(), self.routes.len());
                self.routes.push(route);
                false
            }
        }
    }

    pub fn get(&self, pattern: &str) -> Option<&Arc<Route>> {
        self.index.get(pattern).map(|&pos| &self.routes[pos])
    }

    /// Routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Route>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::MiddlewareError;
    use crate::routing::{RouteDefinition, RouteMatch};

    fn build(pattern: &str, handler: fn(&RouteMatch)) -> Route {
        RouteDefinition::new(pattern)
            .handler(handler)
            .build()
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_registration_order() {
        let mut table = RouteTable::new();
        table.insert(build("/b", |_| {}));
        table.insert(build("/a", |_| {}));
        table.insert(build("/c", |_| {}));

        let patterns: Vec<_> = table.iter().map(|r| r.pattern().to_string()).collect();
        assert_eq!(patterns, ["/b", "/a", "/c"]);
    }

    #[test]
    fn test_reregistration_replaces_in_place() {
        let mut table = RouteTable::new();
        assert!(!table.insert(build("/a", |_| {})));
        table.insert(build("/b", |_| {}));

        let replacement = RouteDefinition::new("/a")
            .middleware(|_: &RouteMatch| Ok::<(), MiddlewareError>(()))
            .handler(|_: &RouteMatch| {})
            .build()
            .unwrap()
            .unwrap();
        assert!(table.insert(replacement));

        assert_eq!(table.len(), 2);
        let first = table.iter().next().unwrap();
        assert_eq!(first.pattern(), "/a");
        assert_eq!(first.middlewares().len(), 1);
        assert_eq!(table.get("/a").unwrap().middlewares().len(), 1);
    }
}
