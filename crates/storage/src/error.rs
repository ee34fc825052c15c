/// All errors that can be returned by a DocumentStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Document not found -- no document with the given id in the collection.
    #[error("document not found: {collection}/{id}")]
    NotFound { collection: String, id: String },

    /// A backend-specific storage error (connection, permission, quota).
    #[error("storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(collection: &str, id: &str) -> Self {
        StoreError::NotFound {
            collection: collection.to_string(),
            id: id.to_string(),
        }
    }
}
