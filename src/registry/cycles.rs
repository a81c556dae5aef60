//! Crop cycle registry.
//!
//! A cycle is scoped to one plot; the link is immutable once set, and
//! ownership follows the plot's owner.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use crate::registry::reference::{RecordKind, RecordRef, require_record_owner};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CropCycle {
    pub cycle_id: u64,
    pub plot_id: u64,
    pub crop_name: String,
    pub start_time: u64,
    pub inputs: String,
    pub notes: String,
}

/// Open a new crop cycle on a plot the caller owns. Returns the cycle id.
pub fn initiate_crop_cycle(
    root: &Path,
    caller: &Principal,
    plot_id: u64,
    crop_name: &str,
    start_time: u64,
    inputs: &str,
    notes: &str,
) -> Result<u64, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "cycles.initiate", |conn| {
        let tx = conn.transaction()?;
        require_record_owner(&tx, RecordRef::new(RecordKind::Plot, plot_id), caller)?;
        let cycle_id = db::next_record_id(&tx, "cycle")?;
        tx.execute(
            "INSERT INTO crop_cycles(cycle_id, plot_id, crop_name, start_time, inputs, notes)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
            params![cycle_id, plot_id, crop_name, start_time, inputs, notes],
        )?;
        tx.commit()?;
        Ok(cycle_id)
    })
}

pub fn fetch_cycle_data(
    root: &Path,
    cycle_id: u64,
) -> Result<Option<CropCycle>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "cycles.fetch", |conn| {
        conn.query_row(
            "SELECT cycle_id, plot_id, crop_name, start_time, inputs, notes
             FROM crop_cycles WHERE cycle_id = ?1",
            params![cycle_id],
            |row| {
                Ok(CropCycle {
                    cycle_id: row.get(0)?,
                    plot_id: row.get(1)?,
                    crop_name: row.get(2)?,
                    start_time: row.get(3)?,
                    inputs: row.get(4)?,
                    notes: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}
