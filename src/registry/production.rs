//! Harvest production records.
//!
//! A record is scoped to one crop cycle; authorization resolves transitively
//! cycle → plot → owner.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use crate::registry::reference::{RecordKind, RecordRef, require_record_owner};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProductionRecord {
    pub record_id: u64,
    pub cycle_id: u64,
    pub quantity: u64,
    pub quality: String,
    pub harvest_time: u64,
    pub notes: String,
}

/// Record harvest output for a cycle whose underlying plot the caller owns.
pub fn record_production_output(
    root: &Path,
    caller: &Principal,
    cycle_id: u64,
    quantity: u64,
    quality: &str,
    harvest_time: u64,
    notes: &str,
) -> Result<u64, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "production.record", |conn| {
        let tx = conn.transaction()?;
        require_record_owner(&tx, RecordRef::new(RecordKind::Cycle, cycle_id), caller)?;
        let record_id = db::next_record_id(&tx, "production")?;
        tx.execute(
            "INSERT INTO production_records(record_id, cycle_id, quantity, quality, harvest_time, notes)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
            params![record_id, cycle_id, quantity, quality, harvest_time, notes],
        )?;
        tx.commit()?;
        Ok(record_id)
    })
}

pub fn fetch_production_data(
    root: &Path,
    record_id: u64,
) -> Result<Option<ProductionRecord>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "production.fetch", |conn| {
        conn.query_row(
            "SELECT record_id, cycle_id, quantity, quality, harvest_time, notes
             FROM production_records WHERE record_id = ?1",
            params![record_id],
            |row| {
                Ok(ProductionRecord {
                    record_id: row.get(0)?,
                    cycle_id: row.get(1)?,
                    quantity: row.get(2)?,
                    quality: row.get(3)?,
                    harvest_time: row.get(4)?,
                    notes: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}
