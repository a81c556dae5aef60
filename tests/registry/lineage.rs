//! Transitive ownership through the plot → cycle → production chain, and
//! dense id allocation across independently counted record kinds.

use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};
use yield_ledger::core::db::initialize_ledger_db;
use yield_ledger::core::error::LedgerError;
use yield_ledger::core::principal::Principal;
use yield_ledger::registry::attestations::lodge_attestation;
use yield_ledger::registry::cycles::{fetch_cycle_data, initiate_crop_cycle};
use yield_ledger::registry::identity::{enroll_producer, register_certifier};
use yield_ledger::registry::plots::register_plot;
use yield_ledger::registry::production::{fetch_production_data, record_production_output};
use yield_ledger::registry::reference::{RecordKind, RecordRef};

fn setup() -> (TempDir, PathBuf) {
    let tmp = tempdir().unwrap();
    let root = tmp.path().to_path_buf();
    initialize_ledger_db(&root).unwrap();
    (tmp, root)
}

fn producer_with_plot(root: &Path, id: &str) -> Principal {
    let p = Principal::new(id);
    enroll_producer(root, &p, "Producer", "Region").unwrap();
    register_plot(root, &p, "Location", 100, "Soil").unwrap();
    p
}

#[test]
fn test_owner_initiates_crop_cycle() {
    let (_tmp, root) = setup();
    let producer = Principal::new("wallet_8");
    enroll_producer(&root, &producer, "Carlos Mendez", "Chile").unwrap();
    register_plot(&root, &producer, "Vineyard Location", 300, "Granitic Soil").unwrap();

    let id = initiate_crop_cycle(
        &root,
        &producer,
        1,
        "Cabernet Sauvignon",
        1678000000,
        "Organic fertilizer, drip irrigation",
        "Early spring planting",
    )
    .unwrap();
    assert_eq!(id, 1);

    let cycle = fetch_cycle_data(&root, 1).unwrap().unwrap();
    assert_eq!(cycle.plot_id, 1);
    assert_eq!(cycle.crop_name, "Cabernet Sauvignon");
    assert_eq!(cycle.start_time, 1678000000);
}

#[test]
fn test_non_owner_cannot_initiate_cycle() {
    let (_tmp, root) = setup();
    let _owner = producer_with_plot(&root, "wallet_9");
    let intruder = Principal::new("wallet_10");

    let err = initiate_crop_cycle(&root, &intruder, 1, "Wheat", 1700000000, "Inputs", "Notes")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotAuthorized));
    assert_eq!(err.code(), Some(100));
}

#[test]
fn test_cycle_on_missing_plot_surfaces_not_authorized() {
    let (_tmp, root) = setup();
    let producer = Principal::new("wallet_11");
    enroll_producer(&root, &producer, "P", "R").unwrap();

    let err =
        initiate_crop_cycle(&root, &producer, 7, "Wheat", 1700000000, "", "").unwrap_err();
    assert!(matches!(err, LedgerError::NotAuthorized));
}

#[test]
fn test_owner_records_production_output() {
    let (_tmp, root) = setup();
    let producer = Principal::new("wallet_11");
    enroll_producer(&root, &producer, "Rajesh Patel", "Gujarat").unwrap();
    register_plot(&root, &producer, "Cotton Field Coordinates", 250, "Black Soil").unwrap();
    initiate_crop_cycle(
        &root,
        &producer,
        1,
        "Cotton",
        1675000000,
        "Neem-based pesticide",
        "Monsoon season",
    )
    .unwrap();

    let id = record_production_output(
        &root,
        &producer,
        1,
        45000,
        "Grade A: Staple length 28-30mm, color white",
        1680000000,
        "Excellent yield this season",
    )
    .unwrap();
    assert_eq!(id, 1);

    let record = fetch_production_data(&root, 1).unwrap().unwrap();
    assert_eq!(record.cycle_id, 1);
    assert_eq!(record.quantity, 45000);
    assert_eq!(record.harvest_time, 1680000000);
}

#[test]
fn test_stranger_cannot_record_production() {
    let (_tmp, root) = setup();
    let farmer = producer_with_plot(&root, "wallet_12");
    initiate_crop_cycle(&root, &farmer, 1, "Crop", 1670000000, "Inputs", "Notes").unwrap();

    let stranger = Principal::new("wallet_13");
    let err = record_production_output(&root, &stranger, 1, 5000, "Assessment", 1675000000, "Notes")
        .unwrap_err();
    assert!(matches!(err, LedgerError::NotAuthorized));
    assert_eq!(err.code(), Some(100));

    // The failed call consumed no production id.
    let id = record_production_output(&root, &farmer, 1, 5000, "Assessment", 1675000000, "Notes")
        .unwrap();
    assert_eq!(id, 1);
}

#[test]
fn test_ids_are_dense_per_kind_across_interleaving() {
    let (_tmp, root) = setup();
    let a = producer_with_plot(&root, "wallet_14");
    let certifier = Principal::new("wallet_15");
    register_certifier(&root, &certifier, "Lab", "quality").unwrap();

    // Interleave kinds; each counter advances independently.
    assert_eq!(register_plot(&root, &a, "Second", 50, "Soil").unwrap(), 2);
    assert_eq!(
        initiate_crop_cycle(&root, &a, 1, "Maize", 1, "", "").unwrap(),
        1
    );
    assert_eq!(
        lodge_attestation(
            &root,
            &certifier,
            RecordRef::new(RecordKind::Plot, 1),
            "verified",
            "",
        )
        .unwrap(),
        1
    );
    assert_eq!(
        initiate_crop_cycle(&root, &a, 2, "Beans", 2, "", "").unwrap(),
        2
    );
    assert_eq!(
        record_production_output(&root, &a, 1, 10, "Q", 3, "").unwrap(),
        1
    );
    assert_eq!(register_plot(&root, &a, "Third", 60, "Soil").unwrap(), 3);
    assert_eq!(
        record_production_output(&root, &a, 2, 20, "Q", 4, "").unwrap(),
        2
    );
}

#[test]
fn test_observed_end_to_end_scenario() {
    let (_tmp, root) = setup();
    let producer = Principal::new("wallet_3");
    let outsider = Principal::new("wallet_4");
    let certifier = Principal::new("wallet_16");

    enroll_producer(&root, &producer, "Alex Kumar", "Punjab").unwrap();
    assert_eq!(
        register_plot(
            &root,
            &producer,
            "Latitude: 31.5N, Longitude: 74.3E",
            150,
            "Alluvial Silt",
        )
        .unwrap(),
        1
    );

    let err = register_plot(&root, &outsider, "Field Location Data", 100, "Sandy Loam")
        .unwrap_err();
    assert_eq!(err.code(), Some(100));

    assert_eq!(
        initiate_crop_cycle(&root, &producer, 1, "Cotton", 1675000000, "Inputs", "Notes").unwrap(),
        1
    );
    assert_eq!(
        record_production_output(&root, &producer, 1, 45000, "Grade A", 1680000000, "").unwrap(),
        1
    );

    register_certifier(&root, &certifier, "Quality Testing Lab", "quality").unwrap();
    assert_eq!(
        lodge_attestation(
            &root,
            &certifier,
            RecordRef::new(RecordKind::Production, 1),
            "verified",
            "All quality standards met",
        )
        .unwrap(),
        1
    );
}
