//! Record-type registry.
//!
//! Every record type the receiving office tracks is described by a
//! [`RecordTypeSpec`]: its collection name, tracking prefix, required domain
//! fields, remarks policy, and refresh policy. The lifecycle engine is
//! parameterized by these specs instead of duplicating per-type branching.

use serde::Serialize;

/// How a required field is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Present and non-empty after trimming.
    Text,
    /// Parses as an exact decimal amount (string or number).
    Amount,
    /// Parses as an RFC 3339 timestamp.
    DateTime,
}

/// A required domain field on a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn text(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Text,
    }
}

const fn amount(name: &'static str) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Amount,
    }
}

/// How a record type's list view is kept fresh.
///
/// The original front end hardcoded a 30-second poll on some pages and none
/// on others; here the strategy is explicit per-type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefreshPolicy {
    /// Refresh only on demand.
    Manual,
    /// Re-list every `secs` seconds.
    Interval { secs: u64 },
}

/// Static description of one record type.
#[derive(Debug, Clone, Serialize)]
pub struct RecordTypeSpec {
    /// Document-store collection name, e.g. `"vouchers"`.
    pub key: &'static str,
    /// Display name, e.g. `"Voucher"`.
    pub name: &'static str,
    /// 1-3 letter tracking-ID prefix, e.g. `"V"`.
    pub prefix: &'static str,
    /// Domain fields that must be present and valid on create.
    pub fields: &'static [FieldSpec],
    /// Whether reject requires non-empty remarks.
    pub remarks_required_on_reject: bool,
    /// Whether time-out requires non-empty remarks.
    pub remarks_required_on_time_out: bool,
    pub refresh: RefreshPolicy,
}

impl RecordTypeSpec {
    /// Default remarks text for the creation history entry.
    pub fn created_remarks(&self) -> String {
        format!("{} record created", self.name)
    }
}

const POLL_30S: RefreshPolicy = RefreshPolicy::Interval { secs: 30 };

/// The built-in record types, in receiving-log display order.
///
/// Reject remarks are mandatory everywhere; time-out remarks are relaxed
/// only for the two catch-all types (`processing`, `others`).
pub const RECORD_TYPES: &[RecordTypeSpec] = &[
    RecordTypeSpec {
        key: "vouchers",
        name: "Voucher",
        prefix: "V",
        fields: &[
            text("dv_no"),
            text("payee"),
            amount("amount"),
            text("particulars"),
            text("designation_office"),
            text("voucher_type"),
            text("funds"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: POLL_30S,
    },
    RecordTypeSpec {
        key: "letters",
        name: "Letter",
        prefix: "L",
        fields: &[text("sender"), text("subject"), text("designation_office")],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: POLL_30S,
    },
    RecordTypeSpec {
        key: "leaves",
        name: "Leave",
        prefix: "LV",
        fields: &[
            text("employee"),
            text("leave_type"),
            text("designation_office"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: POLL_30S,
    },
    RecordTypeSpec {
        key: "locators",
        name: "Locator",
        prefix: "LOC",
        fields: &[
            text("employee"),
            text("destination"),
            text("designation_office"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: RefreshPolicy::Manual,
    },
    RecordTypeSpec {
        key: "obligation_requests",
        name: "Obligation Request",
        prefix: "OR",
        fields: &[
            text("payee"),
            amount("amount"),
            text("particulars"),
            text("designation_office"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: POLL_30S,
    },
    RecordTypeSpec {
        key: "purchase_requests",
        name: "Purchase Request",
        prefix: "PR",
        fields: &[
            text("item_description"),
            amount("amount"),
            text("designation_office"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: POLL_30S,
    },
    RecordTypeSpec {
        key: "travel_orders",
        name: "Travel Order",
        prefix: "TO",
        fields: &[
            text("employee"),
            text("destination"),
            text("purpose"),
            text("designation_office"),
        ],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: RefreshPolicy::Manual,
    },
    RecordTypeSpec {
        key: "overtimes",
        name: "Overtime",
        prefix: "OT",
        fields: &[text("employee"), text("purpose"), text("designation_office")],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: RefreshPolicy::Manual,
    },
    RecordTypeSpec {
        key: "admin_pgo",
        name: "Admin to PGO",
        prefix: "AP",
        fields: &[text("sender"), text("subject"), text("designation_office")],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: true,
        refresh: RefreshPolicy::Manual,
    },
    RecordTypeSpec {
        key: "processing",
        name: "Processing",
        prefix: "PRC",
        fields: &[text("description"), text("designation_office")],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: false,
        refresh: RefreshPolicy::Manual,
    },
    RecordTypeSpec {
        key: "others",
        name: "Others",
        prefix: "OTH",
        fields: &[text("description")],
        remarks_required_on_reject: true,
        remarks_required_on_time_out: false,
        refresh: RefreshPolicy::Manual,
    },
];

/// The full registry.
pub fn registry() -> &'static [RecordTypeSpec] {
    RECORD_TYPES
}

/// Look up a record type by collection key.
pub fn find_type(key: &str) -> Option<&'static RecordTypeSpec> {
    RECORD_TYPES.iter().find(|t| t.key == key)
}
