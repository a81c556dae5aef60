use crate::core::broker::LedgerBroker;
use crate::core::error;
use crate::core::schemas;
use rusqlite::{Connection, params};
use std::fs;
use std::path::{Path, PathBuf};

pub fn db_connect(db_path: &str) -> Result<Connection, error::LedgerError> {
    let conn = Connection::open(db_path)?;
    conn.busy_timeout(std::time::Duration::from_secs(5))
        .map_err(error::LedgerError::RusqliteError)?;
    conn.query_row("PRAGMA journal_mode=WAL;", [], |_| Ok(()))
        .map_err(error::LedgerError::RusqliteError)?;
    conn.execute("PRAGMA foreign_keys=ON;", [])
        .map_err(error::LedgerError::RusqliteError)?;
    Ok(conn)
}

pub fn ledger_db_path(root: &Path) -> PathBuf {
    root.join(schemas::LEDGER_DB_NAME)
}

/// Create all registry tables and seed the per-kind id counters at 0.
/// Safe to call repeatedly; existing data is preserved.
pub fn initialize_ledger_db(root: &Path) -> Result<(), error::LedgerError> {
    let db_path = ledger_db_path(root);
    let parent_dir = db_path.parent().unwrap();
    fs::create_dir_all(parent_dir).map_err(error::LedgerError::IoError)?;

    let broker = LedgerBroker::new(root);
    broker.with_conn(&db_path, "ledger", "ledger.init", |conn| {
        conn.execute(schemas::LEDGER_DB_SCHEMA_PRODUCERS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_CERTIFIERS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_PLOTS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_PLOTS_OWNER_INDEX, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_CROP_CYCLES, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_PRODUCTION_RECORDS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_ATTESTATIONS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_ATTESTATIONS_TARGET_INDEX, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_ACCESS_GRANTS, [])?;
        conn.execute(schemas::LEDGER_DB_SCHEMA_COUNTERS, [])?;
        for kind in schemas::COUNTER_KINDS {
            conn.execute(
                "INSERT OR IGNORE INTO counters(kind, last_id) VALUES(?1, 0)",
                params![kind],
            )?;
        }
        Ok(())
    })
}

/// Allocate the next sequential id for a counter kind. The counter row holds
/// the last-issued id; callers must run this inside the operation's
/// transaction so a failed operation never consumes an id.
pub fn next_record_id(conn: &Connection, kind: &str) -> Result<u64, error::LedgerError> {
    conn.execute(
        "UPDATE counters SET last_id = last_id + 1 WHERE kind = ?1",
        params![kind],
    )?;
    let id: u64 = conn.query_row(
        "SELECT last_id FROM counters WHERE kind = ?1",
        params![kind],
        |row| row.get(0),
    )?;
    Ok(id)
}
