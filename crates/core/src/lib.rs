//! docket-core: record model and record-type registry.
//!
//! Provides the pieces shared by every record type in the receiving office:
//!
//! - [`Record`] -- a tracked document with its lifecycle state and
//!   append-only remarks history
//! - [`RecordStatus`] / [`HistoryKind`] / [`HistoryEntry`] -- the status
//!   state machine and its audit trail
//! - [`RecordTypeSpec`] / [`registry()`] -- the built-in record types
//!   (vouchers, letters, leaves, ...) with their tracking prefixes,
//!   required fields, and remarks policy
//! - [`format_tracking_id`] -- the `(PREFIX) YYYY/MM/DD-NNN` display ID
//! - [`validate_fields`] -- required-field validation run before any
//!   store write
//!
//! This crate is synchronous and I/O-free; persistence lives behind the
//! `DocumentStore` trait in docket-storage and the lifecycle operations in
//! docket-engine.

pub mod error;
pub mod record;
pub mod status;
pub mod tracking;
pub mod types;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use error::ValidationError;
pub use record::Record;
pub use status::{HistoryEntry, HistoryKind, RecordStatus};
pub use tracking::{format_tracking_id, TRACKING_SEQ_WIDTH};
pub use types::{FieldKind, FieldSpec, RecordTypeSpec, RefreshPolicy};
pub use validate::validate_fields;

pub use types::{find_type, registry};
