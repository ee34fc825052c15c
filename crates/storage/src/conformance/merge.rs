use std::future::Future;

use serde_json::json;

use super::{make_fields, make_letter, TestResult};
use crate::DocumentStore;

pub(super) async fn run_merge_tests<S, F, Fut>(factory: &F) -> Vec<TestResult>
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.push(TestResult::from_result(
        "merge",
        "update_replaces_named_fields",
        update_replaces_named_fields(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "update_leaves_unnamed_fields_untouched",
        update_leaves_unnamed_fields_untouched(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "update_can_introduce_new_fields",
        update_can_introduce_new_fields(factory).await,
    ));
    results.push(TestResult::from_result(
        "merge",
        "update_does_not_change_the_id",
        update_does_not_change_the_id(factory).await,
    ));

    results
}

// ── Test implementations ──────────────────────────────────────────────────────

/// Fields named in the partial map must take the new values.
async fn update_replaces_named_fields<S, F, Fut>(factory: &F) -> Result<(), String>
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

    s.update_document(
        "letters",
        &doc.id,
        make_fields(&[("status", json!("Completed"))]),
    )
    .await
    .map_err(|e| e.to_string())?;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs[0].field_str("status") != Some("Completed") {
        return Err(format!("expected Completed, got {:?}", docs[0].fields));
    }
    Ok(())
}

/// Fields absent from the partial map must keep their stored values.
async fn update_leaves_unnamed_fields_untouched<S, F, Fut>(factory: &F) -> Result<(), String>
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

    s.update_document(
        "letters",
        &doc.id,
        make_fields(&[("status", json!("Rejected"))]),
    )
    .await
    .map_err(|e| e.to_string())?;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs[0].field_str("sender") != Some("HR") {
        return Err("merge clobbered an unnamed field".to_string());
    }
    if docs[0].field_str("subject") != Some("Conformance memo") {
        return Err("merge clobbered an unnamed field".to_string());
    }
    Ok(())
}

/// A partial map may add fields the document did not have.
async fn update_can_introduce_new_fields<S, F, Fut>(factory: &F) -> Result<(), String>
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

    s.update_document(
        "letters",
        &doc.id,
        make_fields(&[("date_time_out", json!("2024-01-16T10:00:00Z"))]),
    )
    .await
    .map_err(|e| e.to_string())?;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs[0].field_str("date_time_out") != Some("2024-01-16T10:00:00Z") {
        return Err("expected new field after merge".to_string());
    }
    Ok(())
}

/// Merging must never rewrite the store-assigned id.
async fn update_does_not_change_the_id<S, F, Fut>(factory: &F) -> Result<(), String>
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

    s.update_document("letters", &doc.id, make_fields(&[("id", json!("forged"))]))
        .await
        .map_err(|e| e.to_string())?;

    let docs = s.list_documents("letters").await.map_err(|e| e.to_string())?;
    if docs[0].id != doc.id {
        return Err(format!("id changed from {} to {}", doc.id, docs[0].id));
    }
    Ok(())
}
