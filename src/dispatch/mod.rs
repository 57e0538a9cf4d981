//! Route dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! RouteMatch + HistoryUpdate
//!     → dispatcher.rs (history update, exactly once)
//!     → middleware.rs (run chain in order, collect failures)
//!     → handler (skipped if a failure halted the chain)
//!     → sink.rs (forward collected failures)
//!     → Return: DispatchOutcome
//! ```
//!
//! # Design Decisions
//! - Middleware outcomes are explicit `Result`s, never panics
//! - Failures are always surfaced: in the outcome and to the error sink
//! - `continue_on_exceptions` decides whether a failure halts the chain
//! - Fully synchronous; no suspension points

pub mod dispatcher;
pub mod middleware;
pub mod sink;

pub use dispatcher::{DispatchOutcome, Dispatcher, HistoryUpdate, MiddlewareFailure};
pub use middleware::{Handler, Middleware, MiddlewareError};
pub use sink::{ErrorSink, MemoryErrorSink, SinkReport, TracingErrorSink};
