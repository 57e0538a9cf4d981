//! Host environment abstraction.
//!
//! # Responsibilities
//! - Read the current location path
//! - Push or replace history entries without reloading
//! - Read and replace the inner HTML of selector-addressed elements
//!
//! # Design Decisions
//! - The router never talks to a browser directly; everything goes through `Host`
//! - Selector lookup is exact-string: the host decides what a selector means
//! - `MemoryHost` is the headless implementation used by the CLI and tests

pub mod memory;

pub use memory::MemoryHost;

/// The DOM-like environment a router drives.
pub trait Host {
    /// Current location path (e.g. `/users/42`).
    fn location_path(&self) -> String;

    /// Add a history entry for `url` and make it current, without navigation.
    fn push_state(&mut self, url: &str);

    /// Replace the current history entry with `url`.
    fn replace_state(&mut self, url: &str);

    /// Inner HTML of the first element matching `selector`, if any.
    fn inner_html(&self, selector: &str) -> Option<String>;

    /// Replace the inner HTML of the element matching `selector`.
    ///
    /// Returns `false` when no element matches.
    fn set_inner_html(&mut self, selector: &str, html: &str) -> bool;
}
