//! docket-storage: the document-store seam.
//!
//! The receiving office's records live in a hosted, schema-less document
//! store. This crate defines the four-method [`DocumentStore`] trait the
//! lifecycle engine is written against, the [`Document`] type, the error
//! taxonomy, an in-memory reference backend ([`MemoryStore`]), and a
//! backend-agnostic [`conformance`] suite any implementation can run.

mod document;
mod error;
mod memory;
mod traits;

pub mod conformance;

pub use document::Document;
pub use error::StoreError;
pub use memory::MemoryStore;
pub use traits::DocumentStore;
