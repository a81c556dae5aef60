//! Producer and certifier profiles.
//!
//! Two independent identity namespaces, each keyed by caller principal and
//! writable exactly once. A single principal may hold both profiles.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProducerProfile {
    pub principal: Principal,
    pub display_name: String,
    pub region: String,
    pub plot_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CertifierProfile {
    pub principal: Principal,
    pub org_name: String,
    pub specialization: String,
}

/// Create the caller's producer profile. Exactly-once per principal.
pub fn enroll_producer(
    root: &Path,
    caller: &Principal,
    display_name: &str,
    region: &str,
) -> Result<(), error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "identity.enroll_producer", |conn| {
        let tx = conn.transaction()?;
        if producer_exists(&tx, caller)? {
            return Err(error::LedgerError::AlreadyRegistered);
        }
        tx.execute(
            "INSERT INTO producers(principal, display_name, region, plot_count)
             VALUES(?1, ?2, ?3, 0)",
            params![caller.as_str(), display_name, region],
        )?;
        tx.commit()?;
        Ok(())
    })
}

/// Create the caller's certifier profile. Independent of producer enrollment.
pub fn register_certifier(
    root: &Path,
    caller: &Principal,
    org_name: &str,
    specialization: &str,
) -> Result<(), error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "identity.register_certifier", |conn| {
        let tx = conn.transaction()?;
        if certifier_exists(&tx, caller)? {
            return Err(error::LedgerError::AlreadyRegistered);
        }
        tx.execute(
            "INSERT INTO certifiers(principal, org_name, specialization) VALUES(?1, ?2, ?3)",
            params![caller.as_str(), org_name, specialization],
        )?;
        tx.commit()?;
        Ok(())
    })
}

pub fn fetch_producer_profile(
    root: &Path,
    principal: &Principal,
) -> Result<Option<ProducerProfile>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "identity.fetch_producer", |conn| {
        conn.query_row(
            "SELECT principal, display_name, region, plot_count
             FROM producers WHERE principal = ?1",
            params![principal.as_str()],
            |row| {
                Ok(ProducerProfile {
                    principal: Principal::new(row.get::<_, String>(0)?),
                    display_name: row.get(1)?,
                    region: row.get(2)?,
                    plot_count: row.get(3)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}

pub fn fetch_certifier_profile(
    root: &Path,
    principal: &Principal,
) -> Result<Option<CertifierProfile>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "identity.fetch_certifier", |conn| {
        conn.query_row(
            "SELECT principal, org_name, specialization FROM certifiers WHERE principal = ?1",
            params![principal.as_str()],
            |row| {
                Ok(CertifierProfile {
                    principal: Principal::new(row.get::<_, String>(0)?),
                    org_name: row.get(1)?,
                    specialization: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}

pub(crate) fn producer_exists(
    conn: &Connection,
    principal: &Principal,
) -> Result<bool, error::LedgerError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM producers WHERE principal = ?1",
            params![principal.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

pub(crate) fn certifier_exists(
    conn: &Connection,
    principal: &Principal,
) -> Result<bool, error::LedgerError> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM certifiers WHERE principal = ?1",
            params![principal.as_str()],
            |row| row.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}
