//! Conformance test suite for `DocumentStore` implementations.
//!
//! This module provides a backend-agnostic test suite that any
//! `DocumentStore` implementation can run to verify correctness. The suite
//! covers:
//!
//! - **CRUD**: id assignment, insertion-order listing, delete semantics
//! - **Merge**: partial-update field semantics
//! - **Error handling**: correct error variants and fields
//!
//! # Usage
//!
//! Backend crates call [`run_conformance_suite`] with a factory function
//! that creates a fresh, empty store instance for each test:
//!
//! ```ignore
//! use docket_storage::conformance::run_conformance_suite;
//!
//! #[tokio::test]
//! async fn hosted_backend_conformance() {
//!     let report = run_conformance_suite(|| async {
//!         create_test_backend().await
//!     }).await;
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod crud;
mod error;
mod merge;

use std::fmt;
use std::future::Future;

use serde_json::{Map, Value};

use crate::DocumentStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "crud", "merge", "error").
    pub category: String,
    /// Test name (e.g. "add_assigns_nonempty_id").
    pub name: String,
    /// Whether the test passed.
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        match result {
            Ok(()) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: true,
                message: None,
            },
            Err(msg) => Self {
                category: category.to_string(),
                name: name.to_string(),
                passed: false,
                message: Some(msg),
            },
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a storage backend.
///
/// The `factory` function is called once per test to create a fresh, empty
/// store instance, ensuring test isolation.
pub async fn run_conformance_suite<S, F, Fut>(factory: F) -> ConformanceReport
where
    S: DocumentStore,
    F: Fn() -> Fut,
    Fut: Future<Output = S>,
{
    let mut results = Vec::new();

    results.extend(crud::run_crud_tests(&factory).await);
    results.extend(merge::run_merge_tests(&factory).await);
    results.extend(error::run_error_tests(&factory).await);

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

// ── Helpers: field maps with sensible defaults ───────────────────────────────

fn make_fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn make_letter(sender: &str) -> Map<String, Value> {
    make_fields(&[
        ("sender", Value::String(sender.to_string())),
        ("subject", Value::String("Conformance memo".to_string())),
        ("status", Value::String("Pending".to_string())),
    ])
}
