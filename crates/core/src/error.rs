//! Validation errors raised before any store write.

/// A required field is missing, empty, or malformed.
///
/// Raised by [`crate::validate_fields`] and by the lifecycle operations'
/// own checks (empty reject remarks, missing time-out date). A validation
/// failure always precedes the mutation: no partial state change occurs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("required field '{field}' is missing or empty")]
    MissingField { field: String },

    #[error("field '{field}' is not a valid amount: {value}")]
    InvalidAmount { field: String, value: String },

    #[error("field '{field}' is not a valid RFC 3339 timestamp: {value}")]
    InvalidTimestamp { field: String, value: String },
}

impl ValidationError {
    /// The offending field name.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::InvalidAmount { field, .. }
            | ValidationError::InvalidTimestamp { field, .. } => field,
        }
    }
}
