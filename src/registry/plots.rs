//! Land plot registry.
//!
//! Plots are owned by the enrolling producer; ownership is fixed at creation
//! and never transfers. The four descriptive fields stay mutable through
//! `adjust_plot_properties`, owner-only.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use crate::registry::identity;
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LandPlot {
    pub plot_id: u64,
    pub owner: Principal,
    pub location: String,
    pub area: u64,
    pub soil_type: String,
    pub active: bool,
}

/// Register a new plot for the calling producer. Requires enrollment;
/// returns the freshly allocated plot id and bumps the producer's plot count.
pub fn register_plot(
    root: &Path,
    caller: &Principal,
    location: &str,
    area: u64,
    soil_type: &str,
) -> Result<u64, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "plots.register", |conn| {
        let tx = conn.transaction()?;
        if !identity::producer_exists(&tx, caller)? {
            return Err(error::LedgerError::NotAuthorized);
        }
        let plot_id = db::next_record_id(&tx, "plot")?;
        tx.execute(
            "INSERT INTO plots(plot_id, owner, location, area, soil_type, active)
             VALUES(?1, ?2, ?3, ?4, ?5, 1)",
            params![plot_id, caller.as_str(), location, area, soil_type],
        )?;
        tx.execute(
            "UPDATE producers SET plot_count = plot_count + 1 WHERE principal = ?1",
            params![caller.as_str()],
        )?;
        tx.commit()?;
        Ok(plot_id)
    })
}

/// Overwrite a plot's mutable fields. Owner-only; a missing plot and a
/// non-owner caller both surface as `NotAuthorized`.
pub fn adjust_plot_properties(
    root: &Path,
    caller: &Principal,
    plot_id: u64,
    location: &str,
    area: u64,
    soil_type: &str,
    active: bool,
) -> Result<(), error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "plots.adjust", |conn| {
        let tx = conn.transaction()?;
        let owner: Option<String> = tx
            .query_row(
                "SELECT owner FROM plots WHERE plot_id = ?1",
                params![plot_id],
                |row| row.get(0),
            )
            .optional()?;
        match owner {
            Some(o) if o == caller.as_str() => {}
            _ => return Err(error::LedgerError::NotAuthorized),
        }
        tx.execute(
            "UPDATE plots SET location = ?2, area = ?3, soil_type = ?4, active = ?5
             WHERE plot_id = ?1",
            params![plot_id, location, area, soil_type, active],
        )?;
        tx.commit()?;
        Ok(())
    })
}

pub fn fetch_land_data(root: &Path, plot_id: u64) -> Result<Option<LandPlot>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "plots.fetch", |conn| {
        conn.query_row(
            "SELECT plot_id, owner, location, area, soil_type, active
             FROM plots WHERE plot_id = ?1",
            params![plot_id],
            |row| {
                Ok(LandPlot {
                    plot_id: row.get(0)?,
                    owner: Principal::new(row.get::<_, String>(1)?),
                    location: row.get(2)?,
                    area: row.get(3)?,
                    soil_type: row.get(4)?,
                    active: row.get(5)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}
