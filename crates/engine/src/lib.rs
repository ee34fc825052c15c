//! docket-engine: the generic record lifecycle engine.
//!
//! One engine replaces the per-page state machines of the original front
//! end: every record type shares the same create / edit / reject / time-out
//! lifecycle, parameterized by its [`docket_core::RecordTypeSpec`] (required
//! fields, tracking prefix, remarks policy) instead of duplicated branching.
//!
//! The engine is written against the [`docket_storage::DocumentStore`]
//! trait and performs no concurrency control beyond a process-wide tracking
//! sequence allocator and the time-out existence re-check: concurrent
//! editors are last-writer-wins, as in the system this replaces.

pub mod auth;
pub mod designations;
pub mod error;
pub mod lifecycle;
pub mod poll;
pub mod receiving_log;
pub mod sequence;

pub use auth::{hash_password, verify_password, Users};
pub use designations::Designations;
pub use error::EngineError;
pub use lifecycle::LifecycleEngine;
pub use poll::Poller;
pub use receiving_log::{receiving_log_rows, LogRow};
pub use sequence::SequenceAllocator;
