//! Top-level facade crate for EcomPulse.
//!
//! Re-exports the domain crate and the server library so users can depend on a single crate.

pub mod core {
    pub use ecompulse_core::*;
}

pub mod server {
    pub use ecompulse_server::*;
}
