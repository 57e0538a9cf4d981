//! Click analysis.

use crate::dispatch::DispatchOutcome;

/// The element a click landed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickTarget {
    pub tag_name: String,
    pub href: Option<String>,
}

impl ClickTarget {
    pub fn new(tag_name: impl Into<String>, href: Option<&str>) -> Self {
        Self {
            tag_name: tag_name.into(),
            href: href.map(str::to_string),
        }
    }

    /// Shorthand for an anchor element.
    pub fn anchor(href: &str) -> Self {
        Self::new("a", Some(href))
    }

    /// The in-app path this click navigates to, or `None` if the click
    /// should be left to the browser.
    pub fn in_app_path(&self) -> Option<&str> {
        if !self.tag_name.eq_ignore_ascii_case("a") {
            return None;
        }
        self.href
            .as_deref()
            .filter(|href| href.starts_with('/'))
    }
}

/// What happened to an intercepted navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// A route matched and was dispatched.
    Dispatched(DispatchOutcome),
    /// No route matched. `handled` is true if a not-found callback ran.
    NotFound { handled: bool },
}

/// Whether the router took over a click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickDisposition {
    /// Default browser behavior proceeds; the router did nothing.
    PassThrough,
    /// Default behavior was prevented and the router navigated.
    Intercepted(NavigationOutcome),
}

impl ClickDisposition {
    pub fn is_intercepted(&self) -> bool {
        matches!(self, Self::Intercepted(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_app_path() {
        assert_eq!(ClickTarget::anchor("/users/1").in_app_path(), Some("/users/1"));
        assert_eq!(ClickTarget::new("A", Some("/x")).in_app_path(), Some("/x"));
    }

    #[test]
    fn test_pass_through_targets() {
        assert!(ClickTarget::anchor("https://example.com").in_app_path().is_none());
        assert!(ClickTarget::anchor("users/1").in_app_path().is_none());
        assert!(ClickTarget::anchor("#top").in_app_path().is_none());
        assert!(ClickTarget::anchor("").in_app_path().is_none());
        assert!(ClickTarget::new("a", None).in_app_path().is_none());
        assert!(ClickTarget::new("button", Some("/x")).in_app_path().is_none());
    }
}
