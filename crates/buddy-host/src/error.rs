//! Error types for the host crate.

use buddy_core::OutputError;
use thiserror::Error;

/// Errors raised by a resource host.
#[derive(Debug, Error)]
pub enum HostError {
    /// A resource with the same URN was already registered.
    #[error("resource {urn} is already registered")]
    DuplicateResource { urn: String },

    /// The host or the remote platform rejected the registration.
    #[error("registration of {token} rejected: {reason}")]
    Rejected { token: String, reason: String },

    /// The host is not able to serve requests.
    #[error("resource host unavailable: {0}")]
    Unavailable(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<HostError> for OutputError {
    fn from(err: HostError) -> Self {
        OutputError::Remote(err.to_string())
    }
}
