//! EcomPulse core: the metrics record, its JSON projection, the random
//! source seam, and the per-tick generator.
//!
//! This crate holds the domain rules (draw ranges, accumulation policy,
//! rounding of the public projection) and carries no runtime or transport
//! dependencies, so the server and tests can drive it directly.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod generator;
pub mod random;
pub mod snapshot;

/// Shared result type.
pub use error::{EcomPulseError, Result};
pub use generator::TickDraws;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use snapshot::{ApiMetrics, MetricsSnapshot, TrafficSources};
