//! EcomPulse server library entry.
//!
//! This crate wires the config layer, the shared metrics store, its ticker,
//! and the HTTP surface into one service. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod store;
pub mod ticker;
