use std::path::PathBuf;
use tempfile::{TempDir, tempdir};
use yield_ledger::core::db::initialize_ledger_db;
use yield_ledger::core::error::LedgerError;
use yield_ledger::core::principal::Principal;
use yield_ledger::registry::identity::{
    enroll_producer, fetch_certifier_profile, fetch_producer_profile, register_certifier,
};

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    initialize_ledger_db(&root).unwrap();
    (tmp, root)
}

#[test]
fn test_producer_enrollment_and_fetch() {
    let (_tmp, root) = setup();
    let caller = Principal::new("wallet_1");

    enroll_producer(&root, &caller, "Maria Santos", "São Paulo").unwrap();

    let profile = fetch_producer_profile(&root, &caller)
        .unwrap()
        .expect("profile should exist");
    assert_eq!(profile.display_name, "Maria Santos");
    assert_eq!(profile.region, "São Paulo");
    assert_eq!(profile.plot_count, 0);
}

#[test]
fn test_duplicate_producer_enrollment_rejected() {
    let (_tmp, root) = setup();
    let caller = Principal::new("wallet_2");

    enroll_producer(&root, &caller, "John Smith", "Iowa").unwrap();

    // A second enrollment fails regardless of argument values.
    let err = enroll_producer(&root, &caller, "Jane Doe", "Nebraska").unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyRegistered));
    assert_eq!(err.code(), Some(102));

    // The first profile is untouched.
    let profile = fetch_producer_profile(&root, &caller).unwrap().unwrap();
    assert_eq!(profile.display_name, "John Smith");
}

#[test]
fn test_duplicate_certifier_registration_rejected() {
    let (_tmp, root) = setup();
    let caller = Principal::new("wallet_15");

    register_certifier(&root, &caller, "First Organization", "sustainability").unwrap();

    let err = register_certifier(&root, &caller, "Second Organization", "quality").unwrap_err();
    assert!(matches!(err, LedgerError::AlreadyRegistered));
    assert_eq!(err.code(), Some(102));
}

#[test]
fn test_producer_and_certifier_namespaces_are_independent() {
    let (_tmp, root) = setup();
    let caller = Principal::new("wallet_3");

    enroll_producer(&root, &caller, "Dual Role", "Region").unwrap();
    register_certifier(&root, &caller, "Quality Testing Lab", "quality").unwrap();

    assert!(fetch_producer_profile(&root, &caller).unwrap().is_some());
    let cert = fetch_certifier_profile(&root, &caller).unwrap().unwrap();
    assert_eq!(cert.org_name, "Quality Testing Lab");
    assert_eq!(cert.specialization, "quality");
}

#[test]
fn test_fetch_absent_profiles_return_none() {
    let (_tmp, root) = setup();
    let unknown = Principal::new("wallet_99");

    assert!(fetch_producer_profile(&root, &unknown).unwrap().is_none());
    assert!(fetch_certifier_profile(&root, &unknown).unwrap().is_none());
}
