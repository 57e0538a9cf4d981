//! Path matching logic.
//!
//! # Responsibilities
//! - Exact pattern match (pattern string equals the URL)
//! - Parameter match (`:name` segments bind the URL segment)
//! - First match wins, in registration order
//!
//! # Design Decisions
//! - Segments are produced by splitting on `/`; empty segments count
//! - Segment counts must be equal for a parameter match
//! - Every position must succeed: a literal mismatch voids the route
//! - No regex, no precedence rules, no query-string handling

use super::route::{Route, RouteMatch, RouteParams};
use super::table::RouteTable;

/// Find the first route in `table` matching `url`.
pub fn match_path(table: &RouteTable, url: &str) -> Option<RouteMatch> {
    let url_segments: Vec<&str> = url.split('/').collect();

    table.iter().find_map(|route| {
        if route.pattern() == url {
            return Some(RouteMatch::new(route.clone(), RouteParams::new(), url));
        }
        if !route.is_parameterized() {
            return None;
        }
        bind_params(route, &url_segments)
            .map(|params| RouteMatch::new(route.clone(), params, url))
    })
}

/// Bind `:name` segments of `route` against `url_segments`.
///
/// Returns `None` when segment counts differ or any literal segment
/// differs from the URL.
fn bind_params(route: &Route, url_segments: &[&str]) -> Option<RouteParams> {
    let segments = route.segments();
    if segments.len() != url_segments.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (segment, value) in segments.iter().zip(url_segments) {
        match segment.strip_prefix(':') {
            Some(name) => params.insert(name, *value),
            None if segment == value => {}
            None => return None,
        }
    }
    Some(params)
}
