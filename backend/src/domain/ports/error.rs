//! Shared failure taxonomy for store ports.

use thiserror::Error;

/// Errors raised by document-store adapters.
///
/// `Unavailable` is deliberately distinct from "not found": absence is an
/// `Option::None` (or an unmatched update) on the port methods, while
/// `Unavailable` means the backing database is unreachable or was never
/// configured and maps to a 500 at the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backing database is unreachable or unconfigured.
    #[error("document store unavailable: {message}")]
    Unavailable {
        /// Driver-level cause, kept out of client responses.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("document store query failed: {message}")]
    Query {
        /// Driver-level cause.
        message: String,
    },
    /// A stored record failed validation at the store boundary.
    #[error("record rejected at the store boundary: {message}")]
    Decode {
        /// Which constraint the record violated.
        message: String,
    },
}

impl StoreError {
    /// Construct an [`StoreError::Unavailable`].
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Construct a [`StoreError::Query`].
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Construct a [`StoreError::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}
