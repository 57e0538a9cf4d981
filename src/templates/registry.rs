//! Named template storage and rendering.

use std::sync::Arc;

use dashmap::DashMap;
use url::Url;

use super::fetch::{resolve_url, HttpTemplateFetcher, PendingTemplate, TemplateFetcher};
use super::source::TemplateSource;
use super::TemplateError;
use crate::host::Host;
use crate::observability::metrics;

/// Outcome of registering a template.
#[derive(Debug)]
pub enum TemplateRegistration {
    /// Stored immediately (literal HTML or selector capture).
    Ready,
    /// Being fetched; the template exists once the load succeeds.
    Pending(PendingTemplate),
}

impl TemplateRegistration {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// Named HTML fragments, shared between the router and background fetches.
#[derive(Clone)]
pub struct TemplateRegistry {
    templates: Arc<DashMap<String, String>>,
    fetcher: Arc<dyn TemplateFetcher>,
    base_url: Option<Url>,
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("templates", &self.templates.len())
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new(Arc::new(HttpTemplateFetcher::default()), None)
    }
}

impl TemplateRegistry {
    pub fn new(fetcher: Arc<dyn TemplateFetcher>, base_url: Option<Url>) -> Self {
        Self {
            templates: Arc::new(DashMap::new()),
            fetcher,
            base_url,
        }
    }

    /// Replace the fetcher used for remote sources. Stored templates and
    /// clones of this registry keep sharing the same store.
    pub fn set_fetcher(&mut self, fetcher: Arc<dyn TemplateFetcher>) {
        self.fetcher = fetcher;
    }

    /// Origin relative template URLs resolve against.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    pub fn insert(&self, name: impl Into<String>, html: impl Into<String>) {
        self.templates.insert(name.into(), html.into());
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.templates.get(name).map(|html| html.value().clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Register template `name` from `source`.
    ///
    /// Remote sources are fetched on the current tokio runtime.
    pub fn register<H>(
        &self,
        host: &H,
        name: &str,
        source: &str,
    ) -> Result<TemplateRegistration, TemplateError>
    where
        H: Host + ?Sized,
    {
        let kind = TemplateSource::classify(source).ok_or(TemplateError::EmptySource)?;

        match kind {
            TemplateSource::Literal(html) => {
                self.store(name, html.to_string(), kind.label());
                Ok(TemplateRegistration::Ready)
            }
            TemplateSource::Selector(selector) => {
                let html = host
                    .inner_html(selector)
                    .ok_or_else(|| TemplateError::ElementNotFound(selector.to_string()))?;
                self.store(name, html, kind.label());
                Ok(TemplateRegistration::Ready)
            }
            TemplateSource::Remote(url) => {
                self.spawn_fetch(name, url).map(TemplateRegistration::Pending)
            }
        }
    }

    fn spawn_fetch(&self, name: &str, url: &str) -> Result<PendingTemplate, TemplateError> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|_| TemplateError::NoRuntime(name.to_string()))?;

        let registry = self.clone();
        let task_name = name.to_string();
        let url = url.to_string();
        let handle = runtime.spawn(async move {
            let result = registry.fetch(&task_name, &url).await;
            if let Err(e) = &result {
                tracing::error!(template = %task_name, error = %e, "Template fetch failed");
            }
            result
        });

        Ok(PendingTemplate::new(name.to_string(), handle))
    }

    /// Fetch `source` and store it as template `name`.
    pub async fn fetch(&self, name: &str, source: &str) -> Result<(), TemplateError> {
        let url = resolve_url(self.base_url.as_ref(), source)?;
        tracing::debug!(template = %name, url = %url, "Fetching template");

        let html = self.fetcher.fetch(&url).await?;
        self.store(name, html, "remote");
        Ok(())
    }

    fn store(&self, name: &str, html: String, source: &'static str) {
        tracing::info!(template = %name, source, bytes = html.len(), "Template registered");
        metrics::record_template_loaded(source);
        self.templates.insert(name.to_string(), html);
    }

    /// Render template `name` into the element at `selector`.
    pub fn render<H, I, K, V>(
        &self,
        host: &mut H,
        name: &str,
        selector: &str,
        values: I,
    ) -> Result<(), TemplateError>
    where
        H: Host + ?Sized,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotRegistered(name.to_string()))?;

        if host.inner_html(selector).is_none() {
            return Err(TemplateError::ElementNotFound(selector.to_string()));
        }

        let html = substitute(&template, values);
        if !host.set_inner_html(selector, &html) {
            return Err(TemplateError::ElementNotFound(selector.to_string()));
        }

        tracing::debug!(template = %name, selector = %selector, "Template rendered");
        Ok(())
    }
}

/// Replace every `{{ key }}` in `html` with its value.
///
/// Only the exact single-space form is recognized; unknown placeholders
/// are left untouched.
pub fn substitute<I, K, V>(html: &str, values: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    values.into_iter().fold(html.to_string(), |out, (key, value)| {
        out.replace(&format!("{{{{ {} }}}}", key.as_ref()), value.as_ref())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    #[test]
    fn test_substitute_all_occurrences() {
        let html = substitute(
            "<h1>{{ name }}</h1><p>{{ name }} is {{ age }}</p>",
            [("name", "Ada"), ("age", "36")],
        );
        assert_eq!(html, "<h1>Ada</h1><p>Ada is 36</p>");
    }

    #[test]
    fn test_substitute_leaves_unknown_placeholders() {
        let html = substitute("{{ a }} {{b}} {{ c }}", [("a", "1"), ("b", "2")]);
        assert_eq!(html, "1 {{b}} {{ c }}");
    }

    #[test]
    fn test_register_literal() {
        let registry = TemplateRegistry::default();
        let host = MemoryHost::default();

        let reg = registry.register(&host, "user", "<p>{{ name }}</p>").unwrap();
        assert!(reg.is_ready());
        assert_eq!(registry.get("user").as_deref(), Some("<p>{{ name }}</p>"));
    }

    #[test]
    fn test_register_selector() {
        let registry = TemplateRegistry::default();
        let host = MemoryHost::default().with_element("#tpl", "<li>{{ item }}</li>");

        registry.register(&host, "item", "#tpl").unwrap();
        assert_eq!(registry.get("item").as_deref(), Some("<li>{{ item }}</li>"));

        let err = registry.register(&host, "other", "#missing").unwrap_err();
        assert_eq!(err, TemplateError::ElementNotFound("#missing".into()));
        assert!(!registry.contains("other"));
    }

    #[test]
    fn test_set_fetcher_keeps_store() {
        let mut registry = TemplateRegistry::default();
        let shared = registry.clone();
        registry.insert("nav", "<nav></nav>");

        registry.set_fetcher(Arc::new(HttpTemplateFetcher::default()));
        assert!(registry.contains("nav"));

        registry.insert("footer", "<footer></footer>");
        assert!(shared.contains("footer"));
    }

    #[test]
    fn test_register_empty_source() {
        let registry = TemplateRegistry::default();
        let err = registry.register(&MemoryHost::default(), "x", "").unwrap_err();
        assert_eq!(err, TemplateError::EmptySource);
    }

    #[test]
    fn test_remote_without_runtime() {
        let registry = TemplateRegistry::default();
        let err = registry
            .register(&MemoryHost::default(), "x", "https://example.com/x.html")
            .unwrap_err();
        assert_eq!(err, TemplateError::NoRuntime("x".into()));
    }

    #[test]
    fn test_render() {
        let registry = TemplateRegistry::default();
        let mut host = MemoryHost::default().with_element("#app", "old");

        let err = registry
            .render(&mut host, "greeting", "#app", [("name", "Ada")])
            .unwrap_err();
        assert_eq!(err, TemplateError::NotRegistered("greeting".into()));

        registry.insert("greeting", "<p>Hi {{ name }}, bye {{ name }}</p>");
        registry.render(&mut host, "greeting", "#app", [("name", "Ada")]).unwrap();
        assert_eq!(host.inner_html("#app").as_deref(), Some("<p>Hi Ada, bye Ada</p>"));

        let err = registry
            .render(&mut host, "greeting", "#nope", [("name", "Ada")])
            .unwrap_err();
        assert_eq!(err, TemplateError::ElementNotFound("#nope".into()));
    }
}
