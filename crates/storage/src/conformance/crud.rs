use std::future::Future;

use serde_json::json;

use super::{make_fields, make_letter, TestResult};
use crate::DocumentStore;

pub(super) async fn run_crud_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "crud",
        "add_assigns_nonempty_id",
        add_assigns_nonempty_id(factory).await,
    ));
    results.push(TestResult::from_result(
        "crud",
        "add_returns_the_stored_fields",
        add_returns_the_stored_fields(factory).await,
    ));
    results.push(TestResult::from_result(
        "crud",
        "ids_are_unique_within_a_collection",
        ids_are_unique_within_a_collection(factory).await,
    ));
    results.push(TestResult::from_result(
        "crud",
        "list_returns_insertion_order",
        list_returns_insertion_order(factory).await,
    ));
    results.push(TestResult::from_result(
        "crud",
        "collections_are_independent",
        collections_are_independent(factory).await,
    ));
    results.push(TestResult::from_result(
        "crud",
        "delete_removes_only_the_target",
        delete_removes_only_the_target(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// The store must assign a non-empty id on add.
async fn add_assigns_nonempty_id<S, F, Fut>(factory: &F) -> Result<(), String>
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
    if doc.id.is_empty() {
        return Err("expected non-empty id".to_string());
    }
    Ok(())
}

/// The returned document must carry the fields that were passed in.
async fn add_returns_the_stored_fields<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let doc = s
        .add_document("letters", make_letter("Budget Office"))
        .await
        .map_err(|e| e.to_string())?;
    if doc.field_str("sender") != Some("Budget Office") {
        return Err(format!("expected sender field, got {:?}", doc.fields));
    }
    Ok(())
}

/// Two adds must never share an id.
async fn ids_are_unique_within_a_collection<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let a = s
        .add_document("letters", make_letter("A"))
        .await
        .map_err(|e| e.to_string())?;
    let b = s
        .add_document("letters", make_letter("B"))
        .await
        .map_err(|e| e.to_string())?;
    if a.id == b.id {
        return Err(format!("duplicate id {}", a.id));
    }
    Ok(())
}

/// Listing must return documents in insertion order.
async fn list_returns_insertion_order<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    for n in 0..4 {
        s.add_document("letters", make_fields(&[("n", json!(n))]))
            .await
            .map_err(|e| e.to_string())?;
    }
    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    let ns: Vec<Option<i64>> = docs.iter().map(|d| d.fields["n"].as_i64()).collect();
    if ns != vec![Some(0), Some(1), Some(2), Some(3)] {
        return Err(format!("expected insertion order, got {ns:?}"));
    }
    Ok(())
}

/// Adding to one collection must not affect another.
async fn collections_are_independent<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    s.add_document("letters", make_letter("HR"))
        .await
        .map_err(|e| e.to_string())?;
    let vouchers = s
        .list_documents("vouchers")
        .await
        .map_err(|e| e.to_string())?;
    if !vouchers.is_empty() {
        return Err(format!("expected empty vouchers, got {}", vouchers.len()));
    }
    Ok(())
}

/// Delete must remove exactly the targeted document.
async fn delete_removes_only_the_target<S, F, Fut>(factory: &F) -> Result<(), String>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let s = factory().await;
    let a = s
        .add_document("letters", make_letter("A"))
        .await
        .map_err(|e| e.to_string())?;
    let b = s
        .add_document("letters", make_letter("B"))
        .await
        .map_err(|e| e.to_string())?;

    s.delete_document("letters", &a.id)
        .await
        .map_err(|e| e.to_string())?;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs.len() != 1 || docs[0].id != b.id {
        return Err(format!(
            "expected only {} to remain, got {:?}",
            b.id,
            docs.iter().map(|d| d.id.clone()).collect::<Vec<_>>()
        ));
    }
    Ok(())
}
