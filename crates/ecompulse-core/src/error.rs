//! Shared error type across EcomPulse crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Configuration could not be loaded or failed validation.
    BadConfig,
    /// Unsupported config schema version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadConfig => "BAD_CONFIG",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, EcomPulseError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum EcomPulseError {
    #[error("bad config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl EcomPulseError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            EcomPulseError::Config(_) => ClientCode::BadConfig,
            EcomPulseError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            EcomPulseError::Internal(_) => ClientCode::Internal,
        }
    }
}
