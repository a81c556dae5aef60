//! Centralized schema definitions for the ledger database.
//!
//! The registry persists into a single SQLite database, `ledger.db`:
//! six keyed tables (one per data domain plus the access-grant table)
//! and one scalar-counter table driving sequential id allocation.

pub const LEDGER_DB_NAME: &str = "ledger.db";

pub const LEDGER_DB_SCHEMA_PRODUCERS: &str = "
    CREATE TABLE IF NOT EXISTS producers (
        principal TEXT PRIMARY KEY,
        display_name TEXT NOT NULL,
        region TEXT NOT NULL,
        plot_count INTEGER NOT NULL DEFAULT 0
    )
";

pub const LEDGER_DB_SCHEMA_CERTIFIERS: &str = "
    CREATE TABLE IF NOT EXISTS certifiers (
        principal TEXT PRIMARY KEY,
        org_name TEXT NOT NULL,
        specialization TEXT NOT NULL
    )
";

pub const LEDGER_DB_SCHEMA_PLOTS: &str = "
    CREATE TABLE IF NOT EXISTS plots (
        plot_id INTEGER PRIMARY KEY,
        owner TEXT NOT NULL,
        location TEXT NOT NULL,
        area INTEGER NOT NULL,
        soil_type TEXT NOT NULL,
        active INTEGER NOT NULL DEFAULT 1
    )
";
pub const LEDGER_DB_SCHEMA_PLOTS_OWNER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_plots_owner ON plots(owner)";

pub const LEDGER_DB_SCHEMA_CROP_CYCLES: &str = "
    CREATE TABLE IF NOT EXISTS crop_cycles (
        cycle_id INTEGER PRIMARY KEY,
        plot_id INTEGER NOT NULL,
        crop_name TEXT NOT NULL,
        start_time INTEGER NOT NULL,
        inputs TEXT NOT NULL,
        notes TEXT NOT NULL,
        FOREIGN KEY(plot_id) REFERENCES plots(plot_id)
    )
";

pub const LEDGER_DB_SCHEMA_PRODUCTION_RECORDS: &str = "
    CREATE TABLE IF NOT EXISTS production_records (
        record_id INTEGER PRIMARY KEY,
        cycle_id INTEGER NOT NULL,
        quantity INTEGER NOT NULL,
        quality TEXT NOT NULL,
        harvest_time INTEGER NOT NULL,
        notes TEXT NOT NULL,
        FOREIGN KEY(cycle_id) REFERENCES crop_cycles(cycle_id)
    )
";

pub const LEDGER_DB_SCHEMA_ATTESTATIONS: &str = "
    CREATE TABLE IF NOT EXISTS attestations (
        attestation_id INTEGER PRIMARY KEY,
        target_kind TEXT NOT NULL,
        target_id INTEGER NOT NULL,
        status TEXT NOT NULL,
        remarks TEXT NOT NULL,
        certifier TEXT NOT NULL,
        recorded_at TEXT NOT NULL
    )
";
pub const LEDGER_DB_SCHEMA_ATTESTATIONS_TARGET_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_attestations_target ON attestations(target_kind, target_id)";

pub const LEDGER_DB_SCHEMA_ACCESS_GRANTS: &str = "
    CREATE TABLE IF NOT EXISTS access_grants (
        target_kind TEXT NOT NULL,
        target_id INTEGER NOT NULL,
        viewer TEXT NOT NULL,
        access_level TEXT NOT NULL,
        granted_by TEXT NOT NULL,
        PRIMARY KEY (target_kind, target_id, viewer)
    )
";

pub const LEDGER_DB_SCHEMA_COUNTERS: &str = "
    CREATE TABLE IF NOT EXISTS counters (
        kind TEXT PRIMARY KEY,
        last_id INTEGER NOT NULL DEFAULT 0
    )
";

/// Counter kinds seeded at initialization. Each holds the last-issued id;
/// allocation increments before issuing, so the first id is always 1.
pub const COUNTER_KINDS: &[&str] = &["plot", "cycle", "production", "attestation"];
