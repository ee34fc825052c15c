//! Record lifecycle status and the append-only remarks history.
//!
//! A record's real lifecycle states are `Pending`, `Completed`, and
//! `Rejected`. "Edited" is NOT a status: it only appears as the action tag
//! on a history entry. The two concepts are kept as separate enums so an
//! edit can never be confused with a state transition.

use serde::{Deserialize, Serialize};

/// Record-level lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordStatus {
    Pending,
    Completed,
    Rejected,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "Pending",
            RecordStatus::Completed => "Completed",
            RecordStatus::Rejected => "Rejected",
        }
    }
}

/// The action that produced a history entry.
///
/// `Edited` exists only here; the record-level status never takes that
/// value. `Created` is the seed entry written once at record creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryKind {
    Created,
    Edited,
    Rejected,
    Completed,
}

impl HistoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryKind::Created => "Created",
            HistoryKind::Edited => "Edited",
            HistoryKind::Rejected => "Rejected",
            HistoryKind::Completed => "Completed",
        }
    }
}

/// One entry in a record's remarks history.
///
/// Entries are append-only: they are written once by a lifecycle operation
/// and never mutated or removed. Insertion order is chronological order.
///
/// `status` is the record's status *after* the action, so the creation
/// entry carries `kind = Created, status = Pending`, and an edit applied to
/// a rejected record carries `kind = Edited, status = Rejected`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub kind: HistoryKind,
    pub status: RecordStatus,
    pub remarks: String,
    /// ISO 8601 / RFC 3339 timestamp string.
    pub timestamp: String,
    pub updated_by: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_plain_string() {
        let json = serde_json::to_value(RecordStatus::Pending).unwrap();
        assert_eq!(json, serde_json::json!("Pending"));
        let back: RecordStatus = serde_json::from_value(json).unwrap();
        assert_eq!(back, RecordStatus::Pending);
    }

    #[test]
    fn edited_is_a_history_kind_not_a_status() {
        assert!(serde_json::from_value::<RecordStatus>(serde_json::json!("Edited")).is_err());
        let kind: HistoryKind = serde_json::from_value(serde_json::json!("Edited")).unwrap();
        assert_eq!(kind, HistoryKind::Edited);
    }

    #[test]
    fn history_entry_round_trips() {
        let entry = HistoryEntry {
            kind: HistoryKind::Rejected,
            status: RecordStatus::Rejected,
            remarks: "Missing receipt".to_string(),
            timestamp: "2024-01-15T08:30:00Z".to_string(),
            updated_by: "clerk1".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "Rejected");
        assert_eq!(json["status"], "Rejected");
        let back: HistoryEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
