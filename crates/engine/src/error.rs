use docket_core::ValidationError;
use docket_storage::StoreError;

/// All errors that can be returned by lifecycle operations.
///
/// Every failure is scoped to the single operation attempted: callers
/// surface a message and the record (and the rest of the store) is left in
/// its pre-mutation state. Nothing is retried automatically and nothing is
/// fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The record-type key does not name a registered type.
    #[error("unknown record type: {key}")]
    UnknownType { key: String },

    /// The referenced record id is absent from the store's current listing
    /// (deleted concurrently, or stale caller state).
    #[error("no {type_key} record with id {id}")]
    NotFound { type_key: String, id: String },

    /// Time-out was requested for a record that already has a
    /// `date_time_out`; the completion stamp is set exactly once.
    #[error("{type_key} record {id} is already timed out")]
    AlreadyTimedOut { type_key: String, id: String },

    /// A required field is missing or malformed; raised before any store
    /// write.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A designation with the same name already exists.
    #[error("designation already exists: {name}")]
    DuplicateDesignation { name: String },

    /// The underlying store operation failed; the operation was not applied.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A record could not be (de)serialized to the flat document form.
    #[error("record serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngineError {
    pub fn unknown_type(key: &str) -> Self {
        EngineError::UnknownType {
            key: key.to_string(),
        }
    }

    pub fn not_found(type_key: &str, id: &str) -> Self {
        EngineError::NotFound {
            type_key: type_key.to_string(),
            id: id.to_string(),
        }
    }
}
