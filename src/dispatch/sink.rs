//! Destinations for collected middleware failures.

use std::sync::{Arc, Mutex};

use super::dispatcher::MiddlewareFailure;

/// Receives the failures collected during one dispatch.
pub trait ErrorSink: Send + Sync {
    /// Called once per dispatch that collected at least one failure.
    ///
    /// `handler_ran` is false when the failures halted the chain.
    fn report(&self, url: &str, failures: &[MiddlewareFailure], handler_ran: bool);
}

/// Default sink: one `warn` event per failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingErrorSink;

impl ErrorSink for TracingErrorSink {
    fn report(&self, url: &str, failures: &[MiddlewareFailure], handler_ran: bool) {
        for failure in failures {
            tracing::warn!(
                url = %url,
                middleware = failure.index,
                error = %failure.error,
                handler_ran,
                "Middleware failed"
            );
        }
    }
}

/// A single report captured by `MemoryErrorSink`.
#[derive(Debug, Clone)]
pub struct SinkReport {
    pub url: String,
    pub failures: Vec<MiddlewareFailure>,
    pub handler_ran: bool,
}

/// Sink that records every report, for inspection by the embedding app.
#[derive(Debug, Default, Clone)]
pub struct MemoryErrorSink {
    reports: Arc<Mutex<Vec<SinkReport>>>,
}

impl MemoryErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports received so far.
    pub fn reports(&self) -> Vec<SinkReport> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }
}

impl ErrorSink for MemoryErrorSink {
    fn report(&self, url: &str, failures: &[MiddlewareFailure], handler_ran: bool) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push(SinkReport {
                url: url.to_string(),
                failures: failures.to_vec(),
                handler_ran,
            });
        }
    }
}
