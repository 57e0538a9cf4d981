//! Remote template loading.

use std::future::Future;
use std::pin::Pin;

use tokio::task::JoinHandle;
use url::Url;

use super::TemplateError;

/// Boxed future returned by `TemplateFetcher::fetch`.
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String, TemplateError>> + Send + 'a>>;

/// Performs the HTTP GET for remote templates.
pub trait TemplateFetcher: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a Url) -> FetchFuture<'a>;
}

/// `reqwest`-backed fetcher. Only a `200 OK` response is accepted.
#[derive(Debug, Clone, Default)]
pub struct HttpTemplateFetcher {
    client: reqwest::Client,
}

impl HttpTemplateFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TemplateFetcher for HttpTemplateFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> FetchFuture<'a> {
        Box::pin(async move {
            let fetch_error = |e: reqwest::Error| TemplateError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            };

            let res = self.client.get(url.clone()).send().await.map_err(fetch_error)?;

            let status = res.status();
            if status != reqwest::StatusCode::OK {
                return Err(TemplateError::Status {
                    url: url.to_string(),
                    status: status.as_u16(),
                });
            }

            res.text().await.map_err(fetch_error)
        })
    }
}

/// Resolve a remote template source to an absolute URL.
///
/// Absolute `http(s)` sources are used as-is; path sources need `base`.
pub fn resolve_url(base: Option<&Url>, source: &str) -> Result<Url, TemplateError> {
    let invalid = |reason: String| TemplateError::InvalidUrl {
        url: source.to_string(),
        reason,
    };

    if source.starts_with("http://") || source.starts_with("https://") {
        return Url::parse(source).map_err(|e| invalid(e.to_string()));
    }

    match base {
        Some(base) => base.join(source).map_err(|e| invalid(e.to_string())),
        None => Err(invalid("relative template URL requires templates.base_url".to_string())),
    }
}

/// A remote template load running in the background.
#[derive(Debug)]
pub struct PendingTemplate {
    name: String,
    handle: JoinHandle<Result<(), TemplateError>>,
}

impl PendingTemplate {
    pub(crate) fn new(name: String, handle: JoinHandle<Result<(), TemplateError>>) -> Self {
        Self { name, handle }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the load to finish and return its result.
    pub async fn wait(self) -> Result<(), TemplateError> {
        match self.handle.await {
            Ok(result) => result,
            Err(_) => Err(TemplateError::TaskFailed(self.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_absolute() {
        let url = resolve_url(None, "https://cdn.example.com/t/user.html").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example.com/t/user.html");
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let base = Url::parse("https://app.example.com/app/").unwrap();
        let url = resolve_url(Some(&base), "/partials/nav.html").unwrap();
        assert_eq!(url.as_str(), "https://app.example.com/partials/nav.html");
    }

    #[test]
    fn test_resolve_relative_without_base() {
        let err = resolve_url(None, "/partials/nav.html").unwrap_err();
        assert!(matches!(err, TemplateError::InvalidUrl { .. }));
    }
}
