//! The record lifecycle state machine.
//!
//! Implements the shared lifecycle of every record type: a record is
//! created `Pending` with one seed history entry, may be edited any number
//! of times, and ends `Rejected` or `Completed` (timed out). Key
//! invariants:
//!
//! - Every successful mutation appends exactly one history entry; the
//!   history is append-only and earlier entries never change.
//! - An edit preserves `Rejected` status; any other status returns to
//!   `Pending`.
//! - `date_time_out` is set exactly once, by a successful time-out.
//! - Validation failures block the operation before any store write.
//!
//! The time-out path re-fetches the type's listing and checks membership
//! by id before mutating: another session may have deleted the record since
//! the caller last looked. This is a soft existence check, not a lock;
//! concurrent edits remain last-writer-wins.

use std::sync::Arc;

use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use docket_core::{
    format_tracking_id, validate_fields, HistoryEntry, HistoryKind, Record, RecordStatus,
    RecordTypeSpec,
};
use docket_storage::DocumentStore;

use crate::error::EngineError;
use crate::sequence::SequenceAllocator;

#[cfg(test)]
mod tests;

/// Field names owned by the lifecycle engine. Stripped from caller-supplied
/// field maps so a create or edit can never forge identity, status, or
/// history.
const RESERVED_FIELDS: &[&str] = &[
    "id",
    "tracking_id",
    "date_time_in",
    "date_time_out",
    "status",
    "time_out_remarks",
    "received_by",
    "remarks_history",
];

/// Current UTC time as an RFC 3339 string.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Today's UTC date, for tracking-ID generation.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// The generic lifecycle engine, shared by all record types.
pub struct LifecycleEngine<S: DocumentStore> {
    store: Arc<S>,
    sequences: SequenceAllocator,
}

impl<S: DocumentStore> LifecycleEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        LifecycleEngine {
            store,
            sequences: SequenceAllocator::new(),
        }
    }

    /// The underlying store, for collaborators (designations, users).
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    fn spec(type_key: &str) -> Result<&'static RecordTypeSpec, EngineError> {
        docket_core::find_type(type_key).ok_or_else(|| EngineError::unknown_type(type_key))
    }

    /// All records of a type, in store order. Read-only; safe to poll.
    ///
    /// Documents that do not deserialize as records (foreign writers, hand
    /// edits) are skipped with a warning rather than failing the listing.
    pub async fn list(&self, type_key: &str) -> Result<Vec<Record>, EngineError> {
        let spec = Self::spec(type_key)?;
        let docs = self.store.list_documents(spec.key).await?;
        let mut records = Vec::with_capacity(docs.len());
        for doc in docs {
            match Record::from_fields(&doc.id, doc.fields) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(type_key, id = %doc.id, error = %e, "skipping malformed document");
                }
            }
        }
        Ok(records)
    }

    /// One record by id, from the store's current listing.
    pub async fn find(&self, type_key: &str, id: &str) -> Result<Record, EngineError> {
        let records = self.list(type_key).await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| EngineError::not_found(type_key, id))
    }

    /// Create a record: validate, assign a tracking ID, seed the history,
    /// persist. Returns the stored record including its store-assigned id.
    pub async fn create(
        &self,
        type_key: &str,
        mut fields: Map<String, Value>,
        actor: &str,
    ) -> Result<Record, EngineError> {
        let spec = Self::spec(type_key)?;
        validate_fields(spec.fields, &fields)?;

        let remarks = take_string(&mut fields, "remarks").unwrap_or_else(|| spec.created_remarks());
        let date_time_in = match take_string(&mut fields, "date_time_in") {
            Some(supplied) => {
                if OffsetDateTime::parse(&supplied, &Rfc3339).is_err() {
                    return Err(docket_core::ValidationError::InvalidTimestamp {
                        field: "date_time_in".to_string(),
                        value: supplied,
                    }
                    .into());
                }
                supplied
            }
            None => now_rfc3339(),
        };
        strip_reserved(&mut fields);

        let seq = self
            .sequences
            .next(spec.key, async {
                Ok(self.store.list_documents(spec.key).await?.len())
            })
            .await?;
        let tracking_id = format_tracking_id(spec.prefix, today(), seq);

        let now = now_rfc3339();
        let mut record = Record {
            id: String::new(),
            tracking_id,
            date_time_in,
            date_time_out: None,
            status: RecordStatus::Pending,
            remarks: remarks.clone(),
            time_out_remarks: None,
            received_by: actor.to_string(),
            remarks_history: vec![HistoryEntry {
                kind: HistoryKind::Created,
                status: RecordStatus::Pending,
                remarks,
                timestamp: now,
                updated_by: actor.to_string(),
            }],
            extra: fields,
        };

        let stored = self.store.add_document(spec.key, record.to_fields()?).await?;
        record.id = stored.id;
        tracing::info!(type_key, tracking_id = %record.tracking_id, "record created");
        Ok(record)
    }

    /// Edit a record: merge the supplied domain fields and append an
    /// `Edited` history entry.
    ///
    /// Status policy: a `Rejected` record stays `Rejected`; anything else
    /// is set (back) to `Pending`.
    pub async fn edit(
        &self,
        type_key: &str,
        id: &str,
        mut fields: Map<String, Value>,
        actor: &str,
    ) -> Result<Record, EngineError> {
        let spec = Self::spec(type_key)?;
        let mut record = self.find(spec.key, id).await?;

        let remarks = take_string(&mut fields, "remarks").unwrap_or_else(|| record.remarks.clone());
        strip_reserved(&mut fields);

        record.status = match record.status {
            RecordStatus::Rejected => RecordStatus::Rejected,
            _ => RecordStatus::Pending,
        };
        record.remarks = remarks.clone();
        record.remarks_history.push(HistoryEntry {
            kind: HistoryKind::Edited,
            status: record.status,
            remarks,
            timestamp: now_rfc3339(),
            updated_by: actor.to_string(),
        });
        for (key, value) in fields {
            record.extra.insert(key, value);
        }

        self.store
            .update_document(spec.key, id, record.to_fields()?)
            .await?;
        tracing::info!(type_key, id, "record edited");
        Ok(record)
    }

    /// Reject a record: append a `Rejected` history entry and set the
    /// status. Remarks are required when the type's policy says so.
    pub async fn reject(
        &self,
        type_key: &str,
        id: &str,
        remarks: &str,
        actor: &str,
    ) -> Result<Record, EngineError> {
        let spec = Self::spec(type_key)?;
        if spec.remarks_required_on_reject && remarks.trim().is_empty() {
            return Err(docket_core::ValidationError::MissingField {
                field: "remarks".to_string(),
            }
            .into());
        }

        let mut record = self.find(spec.key, id).await?;
        record.status = RecordStatus::Rejected;
        record.remarks = remarks.to_string();
        record.remarks_history.push(HistoryEntry {
            kind: HistoryKind::Rejected,
            status: RecordStatus::Rejected,
            remarks: remarks.to_string(),
            timestamp: now_rfc3339(),
            updated_by: actor.to_string(),
        });

        self.store
            .update_document(spec.key, id, record.to_fields()?)
            .await?;
        tracing::info!(type_key, id, "record rejected");
        Ok(record)
    }

    /// Time out (complete) a record: stamp `date_time_out`, append a
    /// `Completed` history entry, set the status.
    ///
    /// Re-fetches the listing before mutating so a record deleted by
    /// another session surfaces as `NotFound` rather than a phantom update.
    pub async fn time_out(
        &self,
        type_key: &str,
        id: &str,
        date_time_out: &str,
        remarks: &str,
        actor: &str,
    ) -> Result<Record, EngineError> {
        let spec = Self::spec(type_key)?;
        if date_time_out.trim().is_empty() {
            return Err(docket_core::ValidationError::MissingField {
                field: "date_time_out".to_string(),
            }
            .into());
        }
        if OffsetDateTime::parse(date_time_out, &Rfc3339).is_err() {
            return Err(docket_core::ValidationError::InvalidTimestamp {
                field: "date_time_out".to_string(),
                value: date_time_out.to_string(),
            }
            .into());
        }
        if spec.remarks_required_on_time_out && remarks.trim().is_empty() {
            return Err(docket_core::ValidationError::MissingField {
                field: "remarks".to_string(),
            }
            .into());
        }

        let mut record = self.find(spec.key, id).await?;
        if record.date_time_out.is_some() {
            return Err(EngineError::AlreadyTimedOut {
                type_key: spec.key.to_string(),
                id: id.to_string(),
            });
        }

        record.status = RecordStatus::Completed;
        record.date_time_out = Some(date_time_out.to_string());
        record.remarks = remarks.to_string();
        record.time_out_remarks = Some(remarks.to_string());
        record.remarks_history.push(HistoryEntry {
            kind: HistoryKind::Completed,
            status: RecordStatus::Completed,
            remarks: remarks.to_string(),
            timestamp: now_rfc3339(),
            updated_by: actor.to_string(),
        });

        self.store
            .update_document(spec.key, id, record.to_fields()?)
            .await?;
        tracing::info!(type_key, id, "record timed out");
        Ok(record)
    }
}

/// Remove `key` from the map if it holds a non-empty string; return it.
fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    }
}

/// Drop engine-owned field names from a caller-supplied map.
fn strip_reserved(fields: &mut Map<String, Value>) {
    for key in RESERVED_FIELDS {
        fields.remove(*key);
    }
}
