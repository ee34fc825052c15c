use std::future::Future;

use super::{make_letter, TestResult};
use crate::{DocumentStore, StoreError};

pub(super) async fn run_error_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "error",
        "unknown_collection_lists_empty",
        unknown_collection_lists_empty(factory).await,
    ));
    results.push(TestResult::from_result(
        "error",
        "not_found_error_names_collection_and_id",
        not_found_error_names_collection_and_id(factory).await,
    ));
    results.push(TestResult::from_result(
        "error",
        "failed_update_leaves_store_unchanged",
        failed_update_leaves_store_unchanged(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// An unknown collection is an empty list, never an error.
async fn unknown_collection_lists_empty<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let docs = s
        .list_documents("never_written")
        .await
        .map_err(|e| e.to_string())?;
    if !docs.is_empty() {
        return Err(format!("expected empty list, got {}", docs.len()));
    }
    Ok(())
}

/// When a backend fails loudly on a missing id, the error must carry the
/// collection and id. (Silent no-op backends pass trivially; the trait
/// permits either.)
async fn not_found_error_names_collection_and_id<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.add_document("letters", make_letter("HR"))
        .await
        .map_err(|e| e.to_string())?;

    match s
        .update_document("letters", "absent-id", make_letter("X"))
        .await
    {
        Ok(()) => Ok(()),
        Err(StoreError::NotFound { collection, id }) => {
            if collection != "letters" || id != "absent-id" {
                return Err(format!("wrong error fields: {collection}/{id}"));
            }
            Ok(())
        }
        Err(other) => Err(format!("expected NotFound, got {other}")),
    }
}

/// A failed update must not disturb existing documents.
async fn failed_update_leaves_store_unchanged<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let doc = s
        .add_document("letters", make_letter("HR"))
        .await
        .map_err(|e| e.to_string())?;

    // Outcome (error or no-op) is backend-defined; the stored document
    // must be intact either way.
    let _ = s
        .update_document("letters", "absent-id", make_letter("X"))
        .await;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs.len() != 1 || docs[0].id != doc.id || docs[0].field_str("sender") != Some("HR") {
        return Err("store changed after failed update".to_string());
    }
    Ok(())
}
