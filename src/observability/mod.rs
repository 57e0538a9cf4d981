//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!     → metrics.rs (counters via `metrics`)
//!
//! Consumers:
//!     → Any tracing subscriber (the CLI installs a fmt subscriber)
//!     → Any metrics recorder the embedding app installs
//! ```
//!
//! # Design Decisions
//! - The library never installs a global subscriber or recorder by itself
//! - Each navigation gets a span carrying a UUID navigation id
//! - Metrics are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
