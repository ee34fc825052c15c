//! Tracking-ID generation.
//!
//! Tracking IDs are short, sortable, human-legible display identifiers of
//! the form `(PREFIX) YYYY/MM/DD-NNN`. They distinguish record type and
//! rough chronological order; the store-assigned document id remains the
//! authoritative key. The sequence number is allocated by the engine
//! (existing record count of the type + 1) and zero-padded to three digits.

use time::Date;

/// Zero-pad width of the tracking-ID sequence suffix.
pub const TRACKING_SEQ_WIDTH: usize = 3;

/// Format a tracking ID from its parts.
///
/// `seq` is 1-based. Sequences beyond 999 widen naturally rather than wrap,
/// so a very busy day still produces unique IDs.
pub fn format_tracking_id(prefix: &str, date: Date, seq: u32) -> String {
    format!(
        "({}) {:04}/{:02}/{:02}-{:03}",
        prefix,
        date.year(),
        u8::from(date.month()),
        date.day(),
        seq
    )
}
