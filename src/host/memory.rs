//! In-memory host with a history stack and a selector-keyed element map.

use std::collections::HashMap;

use super::Host;

/// Headless `Host` implementation.
///
/// History behaves like a browser session history: pushing truncates any
/// forward entries, `back`/`forward` move the cursor and change the location.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    entries: Vec<String>,
    cursor: usize,
    elements: HashMap<String, String>,
    pushes: usize,
}

impl MemoryHost {
    /// Create a host whose current location is `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            entries: vec![path.into()],
            cursor: 0,
            elements: HashMap::new(),
            pushes: 0,
        }
    }

    /// Register an element addressable by `selector`.
    pub fn with_element(mut self, selector: impl Into<String>, html: impl Into<String>) -> Self {
        self.elements.insert(selector.into(), html.into());
        self
    }

    /// Insert or overwrite an element.
    pub fn insert_element(&mut self, selector: impl Into<String>, html: impl Into<String>) {
        self.elements.insert(selector.into(), html.into());
    }

    /// All history entries, oldest first.
    pub fn history(&self) -> &[String] {
        &self.entries
    }

    /// Number of `push_state` calls seen so far.
    pub fn push_count(&self) -> usize {
        self.pushes
    }

    /// Move one entry back. Returns `false` at the start of history.
    ///
    /// Like a browser, this only changes the location; the caller is
    /// responsible for delivering the popstate event to the router.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Move one entry forward. Returns `false` at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Host for MemoryHost {
    fn location_path(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn push_state(&mut self, url: &str) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(url.to_string());
        self.cursor = self.entries.len() - 1;
        self.pushes += 1;
    }

    fn replace_state(&mut self, url: &str) {
        self.entries[self.cursor] = url.to_string();
    }

    fn inner_html(&self, selector: &str) -> Option<String> {
        self.elements.get(selector).cloned()
    }

    fn set_inner_html(&mut self, selector: &str, html: &str) -> bool {
        match self.elements.get_mut(selector) {
            Some(content) => {
                *content = html.to_string();
                true
            }
            None => false,
        }
    }
}
