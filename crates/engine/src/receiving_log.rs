//! Receiving-log projection.
//!
//! The printed receiving log is a flat table of a type's records: tracking
//! ID, in/out timestamps, status, receiver, and a one-column summary taken
//! from the type's first required field. Pure projection; no store access.

use serde::Serialize;

use docket_core::{Record, RecordTypeSpec};

/// One printable receiving-log row.
#[derive(Debug, Clone, Serialize)]
pub struct LogRow {
    pub tracking_id: String,
    pub date_time_in: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time_out: Option<String>,
    pub status: String,
    pub received_by: String,
    /// Value of the type's first required field (payee, sender, ...).
    pub detail: String,
}

/// Project records into receiving-log rows, preserving store order.
pub fn receiving_log_rows(spec: &RecordTypeSpec, records: &[Record]) -> Vec<LogRow> {
    let detail_field = spec.fields.first().map(|f| f.name);
    records
        .iter()
        .map(|record| LogRow {
            tracking_id: record.tracking_id.clone(),
            date_time_in: record.date_time_in.clone(),
            date_time_out: record.date_time_out.clone(),
            status: record.status.as_str().to_string(),
            received_by: record.received_by.clone(),
            detail: detail_field
                .and_then(|f| record.extra_str(f))
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}
