//! The generic tracked record.
//!
//! Concrete record types (Voucher, Letter, Leave, ...) share this shape and
//! differ only in their domain fields, which live in the flattened `extra`
//! map because the backing document store is schema-less. The store-assigned
//! `id` is the authoritative identity; the tracking ID is a display
//! convenience.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::status::{HistoryEntry, RecordStatus};

/// A tracked document moving through receive -> process -> complete/reject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned opaque key. Not part of the stored field map; attached
    /// when a document is read back from the store.
    #[serde(skip)]
    pub id: String,
    /// Human-readable `(PREFIX) YYYY/MM/DD-NNN` display ID, assigned once at
    /// creation.
    pub tracking_id: String,
    /// ISO 8601 / RFC 3339 timestamp the record was received.
    pub date_time_in: String,
    /// ISO 8601 / RFC 3339 timestamp the record was timed out. Absent until
    /// the time-out action occurs; set exactly once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time_out: Option<String>,
    pub status: RecordStatus,
    /// Current free-text note; replaced by edit/reject/time-out.
    pub remarks: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_out_remarks: Option<String>,
    pub received_by: String,
    /// Append-only audit trail; one entry per lifecycle action.
    pub remarks_history: Vec<HistoryEntry>,
    /// Type-specific domain fields (payee, amount, leave_type, ...),
    /// flattened into the stored document.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record {
    /// Serialize to the flat field map stored in the document store.
    ///
    /// The store-assigned `id` is deliberately not part of the map.
    pub fn to_fields(&self) -> Result<Map<String, Value>, serde_json::Error> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(serde::ser::Error::custom(format!(
                "record serialized to non-object: {other:?}"
            ))),
        }
    }

    /// Rebuild a record from a stored document's id and field map.
    pub fn from_fields(id: &str, fields: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let mut record: Record = serde_json::from_value(Value::Object(fields))?;
        record.id = id.to_string();
        Ok(record)
    }

    /// Value of a domain field, if present and a string.
    pub fn extra_str(&self, name: &str) -> Option<&str> {
        self.extra.get(name).and_then(Value::as_str)
    }
}
