//! Exporter-side observability.
//!
//! Metrics live in a `prometheus::Registry` and are rendered by the
//! `/metrics` handler in the text exposition format.

pub mod metrics;
