use async_trait::async_trait;

use serde_json::{Map, Value};

use crate::document::Document;
use crate::error::StoreError;

/// The storage trait for docket document backends.
///
/// A `DocumentStore` implementation provides collection-keyed storage of
/// flat JSON documents, matching the contract of the hosted document store
/// the receiving office runs against. The store is assumed reliable,
/// single-document-atomic, and schema-less.
///
/// ## Consistency Contract
///
/// - `add_document` assigns the opaque document id and returns the stored
///   document. A concurrent `list_documents` is NOT guaranteed to see a
///   just-added document (eventual, not synchronized).
/// - `list_documents` returns documents in insertion order. An unknown
///   collection is an empty list, not an error.
/// - `update_document` MERGES the partial field map into the stored
///   document: named top-level fields are replaced, all other fields are
///   left untouched. The whole document is never replaced.
/// - `update_document` / `delete_document` behavior on a missing id is
///   backend-defined: an implementation may fail loudly with
///   [`StoreError::NotFound`] or silently no-op. Callers MUST NOT trust
///   that an update occurred without re-reading (the lifecycle engine's
///   time-out path re-fetches for exactly this reason).
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync + 'static` to be used in axum
/// application state and across async task boundaries.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Add a document to a collection, assigning its id.
    ///
    /// Returns the stored document including the assigned id.
    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError>;

    /// List all documents in a collection, in insertion order.
    ///
    /// Read-only and side-effect-free; safe to poll repeatedly.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError>;

    /// Merge `partial` into the document with the given id.
    ///
    /// Top-level fields named in `partial` replace the stored values; all
    /// other stored fields are untouched.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        partial: Map<String, Value>,
    ) -> Result<(), StoreError>;

    /// Delete the document with the given id.
    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}
