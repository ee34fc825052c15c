//! In-memory reference backend.
//!
//! Used by the engine test suites, the conformance suite, and `docket
//! serve` when no hosted backend is wired in. Not a persistence solution:
//! contents vanish with the process.

use std::collections::HashMap;

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::{Map, Value};
use tokio::sync::RwLock;

use crate::document::Document;
use crate::error::StoreError;
use crate::traits::DocumentStore;
use async_trait::async_trait;

/// Length of generated document ids, matching the hosted store's key style.
const ID_LEN: usize = 20;

/// Collection name -> documents in insertion order.
type Collections = HashMap<String, Vec<Document>>;

/// In-memory [`DocumentStore`] with insertion-order listing.
///
/// `update_document` and `delete_document` on a missing id fail loudly with
/// [`StoreError::NotFound`]; the trait permits silent no-op backends, so
/// engine code must not rely on this strictness.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_id() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ID_LEN)
            .map(char::from)
            .collect()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn add_document(
        &self,
        collection: &str,
        fields: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let doc = Document::new(Self::new_id(), fields);
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(doc.clone());
        Ok(doc)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        partial: Map<String, Value>,
    ) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let doc = docs
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        for (key, value) in partial {
            doc.fields.insert(key, value);
        }
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let docs = collections
            .get_mut(collection)
            .ok_or_else(|| StoreError::not_found(collection, id))?;
        let before = docs.len();
        docs.retain(|d| d.id != id);
        if docs.len() == before {
            return Err(StoreError::not_found(collection, id));
        }
        Ok(())
    }
}
