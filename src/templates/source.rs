//! Template source classification.

/// Where a template's HTML comes from, decided by the source string's prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource<'a> {
    /// Starts with `<`: the string is the HTML.
    Literal(&'a str),
    /// Starts with `/`, `http://` or `https://`: fetched from that URL.
    Remote(&'a str),
    /// Anything else: a selector whose element's inner HTML is captured.
    Selector(&'a str),
}

impl<'a> TemplateSource<'a> {
    /// Classify `source`. Returns `None` for an empty string.
    pub fn classify(source: &'a str) -> Option<Self> {
        if source.is_empty() {
            None
        } else if source.starts_with('<') {
            Some(Self::Literal(source))
        } else if source.starts_with('/')
            || source.starts_with("http://")
            || source.starts_with("https://")
        {
            Some(Self::Remote(source))
        } else {
            Some(Self::Selector(source))
        }
    }

    /// Metric label for this kind of source.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Literal(_) => "literal",
            Self::Remote(_) => "remote",
            Self::Selector(_) => "selector",
        }
    }
}
