//! Router metrics.
//!
//! # Metrics
//! - `router_navigations_total` (counter): dispatches by outcome
//! - `router_not_found_total` (counter): navigations with no matching route
//! - `router_middleware_failures_total` (counter): failed middleware calls
//! - `router_templates_loaded_total` (counter): templates stored, by source

use ::metrics::counter;

pub fn record_navigation(outcome: &'static str) {
    counter!("router_navigations_total", "outcome" => outcome).increment(1);
}

pub fn record_not_found() {
    counter!("router_not_found_total").increment(1);
}

pub fn record_middleware_failure() {
    counter!("router_middleware_failures_total").increment(1);
}

pub fn record_template_loaded(source: &'static str) {
    counter!("router_templates_loaded_total", "source" => source).increment(1);
}
