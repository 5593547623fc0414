//! Error types for resource binding.

use buddy_host::HostError;
use thiserror::Error;

/// Errors raised while binding a resource.
///
/// Validation variants are raised before the host is contacted. Host
/// failures pass through unchanged.
#[derive(Debug, Error)]
pub enum BindingError {
    /// A field required at creation time was not supplied.
    #[error("missing required field '{field}' for resource {resource}")]
    MissingRequiredField { resource: String, field: String },

    /// A field the resource does not declare was supplied.
    #[error("unknown field '{field}' for resource {resource}")]
    UnknownField { resource: String, field: String },

    /// A literal value does not fit the field's declared kind.
    #[error("invalid value for field '{field}' of resource {resource}: {reason}")]
    InvalidFieldValue {
        resource: String,
        field: String,
        reason: String,
    },

    /// The resource host failed.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl BindingError {
    /// Name of the offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            BindingError::MissingRequiredField { field, .. }
            | BindingError::UnknownField { field, .. }
            | BindingError::InvalidFieldValue { field, .. } => Some(field),
            BindingError::Host(_) => None,
        }
    }

    /// Whether this error was raised before contacting the host.
    pub fn is_validation(&self) -> bool {
        !matches!(self, BindingError::Host(_))
    }
}
