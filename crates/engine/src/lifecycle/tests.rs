use std::sync::Arc;

use serde_json::{json, Map, Value};

use docket_core::{HistoryKind, RecordStatus, ValidationError};
use docket_storage::MemoryStore;

use super::*;

fn engine() -> LifecycleEngine<MemoryStore> {
    LifecycleEngine::new(Arc::new(MemoryStore::new()))
}

fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

/// A complete, valid voucher form.
fn voucher_fields() -> Map<String, Value> {
    fields(&[
        ("dv_no", json!("DV-001")),
        ("payee", json!("Jane Doe")),
        ("amount", json!(500)),
        ("particulars", json!("Supplies")),
        ("designation_office", json!("Admin")),
        ("voucher_type", json!("Cash")),
        ("funds", json!("GF")),
    ])
}

// ──────────────────────────────────────────────
// Create
// ──────────────────────────────────────────────

#[tokio::test]
async fn create_seeds_pending_with_one_history_entry() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    assert_eq!(record.status, RecordStatus::Pending);
    assert_eq!(record.received_by, "clerk1");
    assert!(!record.id.is_empty());
    assert!(record.date_time_out.is_none());

    assert_eq!(record.remarks_history.len(), 1);
    let seed = &record.remarks_history[0];
    assert_eq!(seed.kind, HistoryKind::Created);
    assert_eq!(seed.status, RecordStatus::Pending);
    assert_eq!(seed.remarks, "Voucher record created");
    assert_eq!(seed.updated_by, "clerk1");
    assert_eq!(record.remarks, "Voucher record created");
}

#[tokio::test]
async fn create_uses_supplied_remarks_when_present() {
    let engine = engine();
    let mut f = voucher_fields();
    f.insert("remarks".to_string(), json!("Walk-in submission"));
    let record = engine.create("vouchers", f, "clerk1").await.unwrap();
    assert_eq!(record.remarks, "Walk-in submission");
    assert_eq!(record.remarks_history[0].remarks, "Walk-in submission");
}

#[tokio::test]
async fn tracking_sequence_counts_existing_records() {
    let engine = engine();
    for expected in 1..=3u32 {
        let record = engine
            .create("vouchers", voucher_fields(), "clerk1")
            .await
            .unwrap();
        let suffix = record.tracking_id.rsplit('-').next().unwrap();
        assert_eq!(suffix, format!("{expected:03}"));
    }
}

#[tokio::test]
async fn tracking_id_carries_the_type_prefix() {
    let engine = engine();
    let voucher = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();
    assert!(voucher.tracking_id.starts_with("(V) "));

    let or = engine
        .create(
            "obligation_requests",
            fields(&[
                ("payee", json!("Jane Doe")),
                ("amount", json!("1200.50")),
                ("particulars", json!("Office chairs")),
                ("designation_office", json!("Admin")),
            ]),
            "clerk1",
        )
        .await
        .unwrap();
    assert!(or.tracking_id.starts_with("(OR) "));
    // Sequences are per type.
    assert!(or.tracking_id.ends_with("-001"));
}

#[tokio::test]
async fn create_validates_required_fields_before_writing() {
    let engine = engine();
    let mut f = voucher_fields();
    f.remove("payee");
    let err = engine.create("vouchers", f, "clerk1").await.unwrap_err();
    match err {
        EngineError::Validation(ValidationError::MissingField { field }) => {
            assert_eq!(field, "payee");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    // Nothing was written.
    assert!(engine.list("vouchers").await.unwrap().is_empty());
}

#[tokio::test]
async fn create_rejects_unknown_type() {
    let engine = engine();
    let err = engine
        .create("widgets", voucher_fields(), "clerk1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::UnknownType { .. }));
}

#[tokio::test]
async fn create_ignores_forged_reserved_fields() {
    let engine = engine();
    let mut f = voucher_fields();
    f.insert("status".to_string(), json!("Completed"));
    f.insert("tracking_id".to_string(), json!("(V) 1999/01/01-999"));
    f.insert("received_by".to_string(), json!("impostor"));

    let record = engine.create("vouchers", f, "clerk1").await.unwrap();
    assert_eq!(record.status, RecordStatus::Pending);
    assert_eq!(record.received_by, "clerk1");
    assert!(!record.tracking_id.contains("1999"));
}

// ──────────────────────────────────────────────
// Edit
// ──────────────────────────────────────────────

#[tokio::test]
async fn edit_appends_one_edited_entry_and_merges_fields() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    let edited = engine
        .edit(
            "vouchers",
            &record.id,
            fields(&[
                ("payee", json!("John Roe")),
                ("remarks", json!("Payee corrected")),
            ]),
            "clerk2",
        )
        .await
        .unwrap();

    assert_eq!(edited.remarks_history.len(), 2);
    let entry = &edited.remarks_history[1];
    assert_eq!(entry.kind, HistoryKind::Edited);
    assert_eq!(entry.status, RecordStatus::Pending);
    assert_eq!(entry.remarks, "Payee corrected");
    assert_eq!(entry.updated_by, "clerk2");

    assert_eq!(edited.extra_str("payee"), Some("John Roe"));
    // Untouched fields survive the merge.
    assert_eq!(edited.extra_str("dv_no"), Some("DV-001"));

    // And the change is persisted, not just returned.
    let listed = engine.find("vouchers", &record.id).await.unwrap();
    assert_eq!(listed.extra_str("payee"), Some("John Roe"));
    assert_eq!(listed.remarks_history.len(), 2);
}

#[tokio::test]
async fn edit_preserves_rejected_status() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();
    engine
        .reject("vouchers", &record.id, "Missing receipt", "supervisor")
        .await
        .unwrap();

    let edited = engine
        .edit(
            "vouchers",
            &record.id,
            fields(&[("particulars", json!("Supplies, corrected"))]),
            "clerk1",
        )
        .await
        .unwrap();

    assert_eq!(edited.status, RecordStatus::Rejected);
    assert_eq!(edited.remarks_history.last().unwrap().kind, HistoryKind::Edited);
    assert_eq!(
        edited.remarks_history.last().unwrap().status,
        RecordStatus::Rejected
    );
}

#[tokio::test]
async fn edit_of_missing_id_is_not_found() {
    let engine = engine();
    engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();
    let err = engine
        .edit("vouchers", "absent", Map::new(), "clerk1")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));
}

#[tokio::test]
async fn edit_never_rewrites_earlier_history() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();
    let seed = record.remarks_history[0].clone();

    for n in 0..3 {
        engine
            .edit(
                "vouchers",
                &record.id,
                fields(&[("remarks", json!(format!("edit {n}")))]),
                "clerk1",
            )
            .await
            .unwrap();
    }

    let after = engine.find("vouchers", &record.id).await.unwrap();
    assert_eq!(after.remarks_history.len(), 4);
    assert_eq!(after.remarks_history[0], seed);
    assert_eq!(after.remarks_history[1].remarks, "edit 0");
    assert_eq!(after.remarks_history[2].remarks, "edit 1");
}

// ──────────────────────────────────────────────
// Reject
// ──────────────────────────────────────────────

#[tokio::test]
async fn reject_missing_receipt_flow() {
    // Create the voucher, then reject it for a missing receipt. Two
    // history entries, Rejected status, remarks replaced.
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();
    assert_eq!(record.status, RecordStatus::Pending);

    let rejected = engine
        .reject("vouchers", &record.id, "Missing receipt", "supervisor")
        .await
        .unwrap();

    assert_eq!(rejected.status, RecordStatus::Rejected);
    assert_eq!(rejected.remarks, "Missing receipt");
    assert_eq!(rejected.remarks_history.len(), 2);
    let last = rejected.remarks_history.last().unwrap();
    assert_eq!(last.kind, HistoryKind::Rejected);
    assert_eq!(last.status, RecordStatus::Rejected);
    assert_eq!(last.remarks, "Missing receipt");
}

#[tokio::test]
async fn reject_with_empty_remarks_changes_nothing() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    let err = engine
        .reject("vouchers", &record.id, "   ", "supervisor")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::MissingField { .. })
    ));

    let unchanged = engine.find("vouchers", &record.id).await.unwrap();
    assert_eq!(unchanged.status, RecordStatus::Pending);
    assert_eq!(unchanged.remarks, "Voucher record created");
    assert_eq!(unchanged.remarks_history.len(), 1);
}

// ──────────────────────────────────────────────
// Time-out
// ──────────────────────────────────────────────

#[tokio::test]
async fn time_out_completes_and_stamps_exactly_once() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    let done = engine
        .time_out(
            "vouchers",
            &record.id,
            "2024-01-16T15:30:00Z",
            "Released to payee",
            "clerk1",
        )
        .await
        .unwrap();

    assert_eq!(done.status, RecordStatus::Completed);
    assert_eq!(done.date_time_out.as_deref(), Some("2024-01-16T15:30:00Z"));
    assert_eq!(done.time_out_remarks.as_deref(), Some("Released to payee"));
    let last = done.remarks_history.last().unwrap();
    assert_eq!(last.kind, HistoryKind::Completed);
    assert_eq!(last.status, RecordStatus::Completed);

    // A second time-out is refused; the stamp is set exactly once.
    let err = engine
        .time_out(
            "vouchers",
            &record.id,
            "2024-01-17T09:00:00Z",
            "again",
            "clerk1",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::AlreadyTimedOut { .. }));

    let after = engine.find("vouchers", &record.id).await.unwrap();
    assert_eq!(after.date_time_out.as_deref(), Some("2024-01-16T15:30:00Z"));
    assert_eq!(after.remarks_history.len(), 2);
}

#[tokio::test]
async fn time_out_of_missing_id_leaves_others_untouched() {
    let engine = engine();
    let kept = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    let err = engine
        .time_out(
            "vouchers",
            "deleted-elsewhere",
            "2024-01-16T15:30:00Z",
            "done",
            "clerk1",
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { .. }));

    let records = engine.list("vouchers").await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, kept.id);
    assert_eq!(records[0].status, RecordStatus::Pending);
}

#[tokio::test]
async fn time_out_validates_date_and_remarks_first() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    let err = engine
        .time_out("vouchers", &record.id, "", "done", "clerk1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::MissingField { .. })
    ));

    let err = engine
        .time_out("vouchers", &record.id, "yesterday", "done", "clerk1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::InvalidTimestamp { .. })
    ));

    let err = engine
        .time_out("vouchers", &record.id, "2024-01-16T15:30:00Z", "", "clerk1")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Validation(ValidationError::MissingField { .. })
    ));

    let unchanged = engine.find("vouchers", &record.id).await.unwrap();
    assert_eq!(unchanged.status, RecordStatus::Pending);
    assert_eq!(unchanged.remarks_history.len(), 1);
}

#[tokio::test]
async fn catch_all_types_allow_empty_time_out_remarks() {
    let engine = engine();
    let record = engine
        .create(
            "others",
            fields(&[("description", json!("Unclassified mail"))]),
            "clerk1",
        )
        .await
        .unwrap();

    let done = engine
        .time_out("others", &record.id, "2024-01-16T15:30:00Z", "", "clerk1")
        .await
        .unwrap();
    assert_eq!(done.status, RecordStatus::Completed);
    assert_eq!(done.remarks, "");
}

// ──────────────────────────────────────────────
// History accounting across a full lifecycle
// ──────────────────────────────────────────────

#[tokio::test]
async fn history_length_is_one_plus_mutations() {
    let engine = engine();
    let record = engine
        .create("vouchers", voucher_fields(), "clerk1")
        .await
        .unwrap();

    engine
        .edit(
            "vouchers",
            &record.id,
            fields(&[("remarks", json!("first pass"))]),
            "clerk1",
        )
        .await
        .unwrap();
    engine
        .edit(
            "vouchers",
            &record.id,
            fields(&[("remarks", json!("second pass"))]),
            "clerk1",
        )
        .await
        .unwrap();
    let done = engine
        .time_out(
            "vouchers",
            &record.id,
            "2024-01-16T15:30:00Z",
            "released",
            "clerk2",
        )
        .await
        .unwrap();

    // 1 creation + 3 mutating calls.
    assert_eq!(done.remarks_history.len(), 4);
    let kinds: Vec<HistoryKind> = done.remarks_history.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            HistoryKind::Created,
            HistoryKind::Edited,
            HistoryKind::Edited,
            HistoryKind::Completed,
        ]
    );
}
