//! The router: registration, lifecycle and navigation entry points.
//!
//! # Lifecycle
//! ```text
//! Router::new(config, host)
//!     → route / not_found / template   (setup)
//!     → start()                        (dispatch current location, begin listening)
//!     → handle_click / handle_popstate (navigation events from the host)
//!     → stop()                         (events pass through again)
//! ```

use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::config::{validate_config, ConfigError, RouterConfig};
use crate::dispatch::{Dispatcher, ErrorSink, Handler, HistoryUpdate};
use crate::host::Host;
use crate::navigation::{ClickDisposition, ClickTarget, NavigationOutcome};
use crate::observability::metrics;
use crate::routing::{match_path, RegistrationError, RouteDefinition, RouteMatch, RouteTable};
use crate::templates::{
    HttpTemplateFetcher, TemplateError, TemplateFetcher, TemplateRegistration, TemplateRegistry,
};

type NotFoundCallback = Arc<dyn Fn() + Send + Sync>;

/// Errors surfaced by router setup and lifecycle calls.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("router already started")]
    AlreadyStarted,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Client-side router over a `Host` environment.
pub struct Router<H: Host> {
    host: H,
    table: RouteTable,
    dispatcher: Dispatcher,
    templates: TemplateRegistry,
    not_found: Option<NotFoundCallback>,
    listening: bool,
}

impl<H: Host> Router<H> {
    /// Build a router from a validated configuration.
    pub fn new(config: &RouterConfig, host: H) -> Result<Self, RouterError> {
        validate_config(config).map_err(ConfigError::Validation)?;

        let base_url = match &config.templates.base_url {
            Some(raw) => Some(Url::parse(raw).map_err(|e| TemplateError::InvalidUrl {
                url: raw.clone(),
                reason: e.to_string(),
            })?),
            None => None,
        };

        let mut router = Self::with_defaults(host);
        router.dispatcher = Dispatcher::new(config.continue_on_exceptions);
        router.templates =
            TemplateRegistry::new(Arc::new(HttpTemplateFetcher::default()), base_url);
        Ok(router)
    }

    /// Router with default configuration.
    pub fn with_defaults(host: H) -> Self {
        Self {
            host,
            table: RouteTable::new(),
            dispatcher: Dispatcher::default(),
            templates: TemplateRegistry::default(),
            not_found: None,
            listening: false,
        }
    }

    /// Send collected middleware failures to `sink`.
    pub fn with_error_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.dispatcher = self.dispatcher.with_sink(sink);
        self
    }

    /// Use `fetcher` for remote templates. Registered templates are kept.
    pub fn with_template_fetcher(mut self, fetcher: Arc<dyn TemplateFetcher>) -> Self {
        self.templates.set_fetcher(fetcher);
        self
    }

    /// Register a route.
    ///
    /// A definition with neither middlewares nor a handler is ignored.
    pub fn route(&mut self, definition: RouteDefinition) -> Result<(), RegistrationError> {
        let Some(route) = definition.build()? else {
            return Ok(());
        };

        let pattern = route.pattern().to_string();
        let middlewares = route.middlewares().len();
        if self.table.insert(route) {
            tracing::warn!(
                pattern = %pattern,
                "Route re-registered, replacing previous definition"
            );
        } else {
            tracing::debug!(pattern = %pattern, middlewares, "Route registered");
        }
        Ok(())
    }

    /// Register a route with no middlewares.
    pub fn route_fn<F>(&mut self, pattern: &str, handler: F) -> Result<(), RegistrationError>
    where
        F: Handler + 'static,
    {
        self.route(RouteDefinition::new(pattern).handler(handler))
    }

    /// Callback run when a navigation matches no route.
    pub fn not_found<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.not_found = Some(Arc::new(callback));
    }

    /// Register a template. See `TemplateRegistry::register`.
    pub fn template(
        &self,
        name: &str,
        source: &str,
    ) -> Result<TemplateRegistration, TemplateError> {
        self.templates.register(&self.host, name, source)
    }

    /// Render template `name` into `selector`, substituting `{{ key }}` placeholders.
    pub fn render<I, K, V>(
        &mut self,
        name: &str,
        selector: &str,
        values: I,
    ) -> Result<(), TemplateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.templates.render(&mut self.host, name, selector, values)
    }

    /// Find the route for `url`, or for the host's current path when `None`.
    pub fn resolve(&self, url: Option<&str>) -> Option<RouteMatch> {
        match url {
            Some(url) => match_path(&self.table, url),
            None => match_path(&self.table, &self.host.location_path()),
        }
    }

    /// Dispatch the current location and start handling navigation events.
    ///
    /// A stopped router can be started again; the current location is
    /// dispatched once more.
    pub fn start(&mut self) -> Result<NavigationOutcome, RouterError> {
        if self.listening {
            return Err(RouterError::AlreadyStarted);
        }
        self.listening = true;

        let path = self.host.location_path();
        tracing::info!(
            path = %path,
            routes = self.table.len(),
            continue_on_exceptions = self.dispatcher.continue_on_exceptions(),
            "Router started"
        );
        Ok(self.navigate_with(&path, HistoryUpdate::Replace))
    }

    /// Stop handling navigation events.
    pub fn stop(&mut self) {
        if self.listening {
            tracing::info!("Router stopped");
        }
        self.listening = false;
    }

    /// Handle a click anywhere in the document.
    pub fn handle_click(&mut self, target: &ClickTarget) -> ClickDisposition {
        if !self.listening {
            return ClickDisposition::PassThrough;
        }
        match target.in_app_path() {
            Some(path) => {
                ClickDisposition::Intercepted(self.navigate_with(path, HistoryUpdate::Push))
            }
            None => ClickDisposition::PassThrough,
        }
    }

    /// Handle a back/forward navigation. History is already correct, so
    /// nothing is pushed.
    pub fn handle_popstate(&mut self) -> Option<NavigationOutcome> {
        if !self.listening {
            return None;
        }
        let path = self.host.location_path();
        Some(self.navigate_with(&path, HistoryUpdate::None))
    }

    /// Programmatic navigation, as if an in-app link to `path` was clicked.
    pub fn navigate(&mut self, path: &str) -> NavigationOutcome {
        self.navigate_with(path, HistoryUpdate::Push)
    }

    fn navigate_with(&mut self, path: &str, history: HistoryUpdate) -> NavigationOutcome {
        match match_path(&self.table, path) {
            Some(route_match) => {
                let outcome = self.dispatcher.dispatch(&mut self.host, &route_match, history);
                NavigationOutcome::Dispatched(outcome)
            }
            None => {
                metrics::record_not_found();
                tracing::debug!(path = %path, "No route matched");
                let handled = match &self.not_found {
                    Some(callback) => {
                        callback();
                        true
                    }
                    None => false,
                };
                NavigationOutcome::NotFound { handled }
            }
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }
}
