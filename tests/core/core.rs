//! Core plumbing: initialization idempotency, audit logging, counter
//! integrity, and error-code stability.

use serde_json::Value;
use std::fs;
use tempfile::tempdir;
use yield_ledger::core::db::initialize_ledger_db;
use yield_ledger::core::error::LedgerError;
use yield_ledger::core::principal::Principal;
use yield_ledger::registry::identity::{enroll_producer, fetch_producer_profile};
use yield_ledger::registry::plots::register_plot;

#[test]
fn test_initialize_is_idempotent_and_preserves_data() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    initialize_ledger_db(&root).unwrap();

    let producer = Principal::new("wallet_1");
    enroll_producer(&root, &producer, "Name", "Region").unwrap();
    register_plot(&root, &producer, "Loc", 100, "Soil").unwrap();

    // Re-initialization keeps tables and counter positions.
    initialize_ledger_db(&root).unwrap();
    let profile = fetch_producer_profile(&root, &producer).unwrap().unwrap();
    assert_eq!(profile.plot_count, 1);
    let next = register_plot(&root, &producer, "Loc 2", 50, "Soil").unwrap();
    assert_eq!(next, 2);
}

#[test]
fn test_audit_log_records_brokered_operations() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    initialize_ledger_db(&root).unwrap();

    let producer = Principal::new("wallet_2");
    enroll_producer(&root, &producer, "Name", "Region").unwrap();
    enroll_producer(&root, &producer, "Name", "Region").unwrap_err();

    let log = fs::read_to_string(root.join("ledger.events.jsonl")).unwrap();
    let events: Vec<Value> = log
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    let enrolls: Vec<&Value> = events
        .iter()
        .filter(|ev| ev["op"] == "identity.enroll_producer")
        .collect();
    assert_eq!(enrolls.len(), 2);
    assert_eq!(enrolls[0]["status"], "success");
    assert_eq!(enrolls[0]["caller"], "wallet_2");
    assert_eq!(enrolls[1]["status"], "error");
}

#[test]
fn test_failed_operation_leaves_no_partial_state() {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    initialize_ledger_db(&root).unwrap();

    // Unenrolled caller: the insert and the counter bump must both roll back.
    let stranger = Principal::new("wallet_3");
    register_plot(&root, &stranger, "Loc", 100, "Soil").unwrap_err();

    let producer = Principal::new("wallet_4");
    enroll_producer(&root, &producer, "Name", "Region").unwrap();
    assert_eq!(register_plot(&root, &producer, "Loc", 100, "Soil").unwrap(), 1);
}

#[test]
fn test_domain_error_codes_are_stable() {
    assert_eq!(LedgerError::NotAuthorized.code(), Some(100));
    assert_eq!(LedgerError::AlreadyRegistered.code(), Some(102));
    assert_eq!(LedgerError::NotCertifier.code(), Some(107));
    assert_eq!(LedgerError::NotFound("x".into()).code(), None);
}
