//! CLI integration tests for all implemented subcommands.
//!
//! Uses `assert_cmd` to spawn the `docket` binary and verify
//! exit codes, stdout content, and stderr content.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: create a Command for the `docket` binary.
fn docket() -> Command {
    cargo_bin_cmd!("docket")
}

// ──────────────────────────────────────────────
// 1. Help and version
// ──────────────────────────────────────────────

#[test]
fn help_exits_0_with_description() {
    docket()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Docket record-tracking toolchain"));
}

#[test]
fn version_exits_0() {
    docket()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("docket"));
}

// ──────────────────────────────────────────────
// 2. types
// ──────────────────────────────────────────────

#[test]
fn types_lists_all_record_types() {
    docket()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("(V) Voucher"))
        .stdout(predicate::str::contains("(OR) Obligation Request"))
        .stdout(predicate::str::contains("(OTH) Others"));
}

#[test]
fn types_json_output_is_parseable() {
    let output = docket()
        .arg("--output")
        .arg("json")
        .arg("types")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let types = json["types"].as_array().expect("types array");
    assert_eq!(types.len(), 11);
    let voucher = types
        .iter()
        .find(|t| t["key"] == "vouchers")
        .expect("vouchers entry");
    assert_eq!(voucher["prefix"], "V");
    assert_eq!(voucher["remarks_required_on_reject"], true);
}

#[test]
fn types_quiet_prints_nothing() {
    docket()
        .arg("--quiet")
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

// ──────────────────────────────────────────────
// 3. hash-password
// ──────────────────────────────────────────────

#[test]
fn hash_password_emits_a_salted_hash() {
    docket()
        .arg("hash-password")
        .arg("s3cret")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("sha256$"))
        .stdout(predicate::str::contains("s3cret").not());
}

#[test]
fn hash_password_json_output_has_the_hash_field() {
    let output = docket()
        .arg("--output")
        .arg("json")
        .arg("hash-password")
        .arg("s3cret")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    let hash = json["password_hash"].as_str().expect("hash string");
    assert!(hash.starts_with("sha256$"));
}

#[test]
fn hash_password_rejects_empty_password() {
    docket()
        .arg("hash-password")
        .arg("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

// ──────────────────────────────────────────────
// 4. serve flag validation
// ──────────────────────────────────────────────

#[test]
fn serve_requires_both_tls_flags_or_neither() {
    docket()
        .arg("serve")
        .arg("--tls-cert")
        .arg("/tmp/cert.pem")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--tls-cert and --tls-key must both be provided",
        ));
}
