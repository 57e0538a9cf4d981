//! Middleware chain execution and history synchronization.

use std::sync::Arc;

use uuid::Uuid;

use super::middleware::MiddlewareError;
use super::sink::{ErrorSink, TracingErrorSink};
use crate::host::Host;
use crate::observability::metrics;
use crate::routing::RouteMatch;

/// How the history stack is updated before the chain runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryUpdate {
    /// Add a new entry (link navigation).
    Push,
    /// Overwrite the current entry (initial load).
    Replace,
    /// Leave history untouched (back/forward, already correct).
    None,
}

/// A middleware failure and the position of the middleware that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MiddlewareFailure {
    pub index: usize,
    pub error: MiddlewareError,
}

/// Result of dispatching one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran. `failures` holds tolerated middleware failures.
    Completed { failures: Vec<MiddlewareFailure> },
    /// A failure halted the chain; later middlewares and the handler were skipped.
    Aborted { failures: Vec<MiddlewareFailure> },
}

impl DispatchOutcome {
    pub fn handler_ran(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    pub fn failures(&self) -> &[MiddlewareFailure] {
        match self {
            Self::Completed { failures } | Self::Aborted { failures } => failures,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Completed { failures } if failures.is_empty() => "completed",
            Self::Completed { .. } => "completed_with_failures",
            Self::Aborted { .. } => "aborted",
        }
    }
}

/// Runs a matched route's middlewares and handler.
#[derive(Clone)]
pub struct Dispatcher {
    continue_on_exceptions: bool,
    sink: Arc<dyn ErrorSink>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("continue_on_exceptions", &self.continue_on_exceptions)
            .finish()
    }
}

impl Dispatcher {
    pub fn new(continue_on_exceptions: bool) -> Self {
        Self {
            continue_on_exceptions,
            sink: Arc::new(TracingErrorSink),
        }
    }

    /// Replace the sink that receives collected failures.
    pub fn with_sink(mut self, sink: Arc<dyn ErrorSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn continue_on_exceptions(&self) -> bool {
        self.continue_on_exceptions
    }

    /// Update history, run the middleware chain, then the handler.
    pub fn dispatch<H>(
        &self,
        host: &mut H,
        route_match: &RouteMatch,
        history: HistoryUpdate,
    ) -> DispatchOutcome
    where
        H: Host + ?Sized,
    {
        let navigation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "navigate",
            %navigation_id,
            url = %route_match.url(),
            pattern = %route_match.route().pattern(),
        );
        let _guard = span.enter();

        match history {
            HistoryUpdate::Push => host.push_state(route_match.url()),
            HistoryUpdate::Replace => host.replace_state(route_match.url()),
            HistoryUpdate::None => {}
        }

        let mut failures = Vec::new();
        for (index, middleware) in route_match.route().middlewares().iter().enumerate() {
            if let Err(error) = middleware.call(route_match) {
                metrics::record_middleware_failure();
                failures.push(MiddlewareFailure { index, error });
            }
            if !failures.is_empty() && !self.continue_on_exceptions {
                break;
            }
        }

        let outcome = if !failures.is_empty() && !self.continue_on_exceptions {
            DispatchOutcome::Aborted { failures }
        } else {
            route_match.route().handler().handle(route_match);
            DispatchOutcome::Completed { failures }
        };

        if !outcome.failures().is_empty() {
            self.sink
                .report(route_match.url(), outcome.failures(), outcome.handler_ran());
        }

        metrics::record_navigation(outcome.label());
        tracing::debug!(outcome = outcome.label(), "Route dispatched");
        outcome
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(false)
    }
}
