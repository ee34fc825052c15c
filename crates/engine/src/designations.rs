//! Designation (office) name management.
//!
//! The `designations` collection holds a simple mutable list of office
//! names; every record type's form reads it to populate the designation
//! selector. Documents are `{ "name": <string> }`.

use std::sync::Arc;

use serde_json::{Map, Value};

use docket_storage::DocumentStore;

use crate::error::EngineError;

const COLLECTION: &str = "designations";

/// Designation list backed by the document store.
pub struct Designations<S: DocumentStore> {
    store: Arc<S>,
}

impl<S: DocumentStore> Designations<S> {
    pub fn new(store: Arc<S>) -> Self {
        Designations { store }
    }

    /// All designation names, in store order.
    pub async fn list(&self) -> Result<Vec<String>, EngineError> {
        let docs = self.store.list_documents(COLLECTION).await?;
        Ok(docs
            .iter()
            .filter_map(|d| d.field_str("name").map(str::to_string))
            .collect())
    }

    /// Add a designation. Blank names and duplicates are refused.
    pub async fn add(&self, name: &str) -> Result<(), EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(docket_core::ValidationError::MissingField {
                field: "name".to_string(),
            }
            .into());
        }
        if self.list().await?.iter().any(|n| n == name) {
            return Err(EngineError::DuplicateDesignation {
                name: name.to_string(),
            });
        }

        let mut fields = Map::new();
        fields.insert("name".to_string(), Value::String(name.to_string()));
        self.store.add_document(COLLECTION, fields).await?;
        tracing::info!(name, "designation added");
        Ok(())
    }

    /// Remove a designation by name.
    pub async fn remove(&self, name: &str) -> Result<(), EngineError> {
        let docs = self.store.list_documents(COLLECTION).await?;
        let doc = docs
            .iter()
            .find(|d| d.field_str("name") == Some(name))
            .ok_or_else(|| EngineError::not_found(COLLECTION, name))?;
        self.store.delete_document(COLLECTION, &doc.id).await?;
        tracing::info!(name, "designation removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docket_storage::MemoryStore;

    fn designations() -> Designations<MemoryStore> {
        Designations::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn add_list_remove_round_trip() {
        let d = designations();
        d.add("Admin").await.unwrap();
        d.add("Budget Office").await.unwrap();
        assert_eq!(d.list().await.unwrap(), vec!["Admin", "Budget Office"]);

        d.remove("Admin").await.unwrap();
        assert_eq!(d.list().await.unwrap(), vec!["Budget Office"]);
    }

    #[tokio::test]
    async fn duplicates_and_blanks_are_refused() {
        let d = designations();
        d.add("Admin").await.unwrap();

        let err = d.add("Admin").await.unwrap_err();
        assert!(matches!(err, EngineError::DuplicateDesignation { .. }));

        let err = d.add("   ").await.unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));

        assert_eq!(d.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn removing_an_unknown_name_is_not_found() {
        let d = designations();
        let err = d.remove("Motor Pool").await.unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }
}
