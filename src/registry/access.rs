//! Viewer access grants.
//!
//! Grant bookkeeping over any (kind, id) record, managed by the record's
//! resolved owner. The grant table is advisory: fetch operations do not gate
//! on it; off-chain consumers check grants before exposing field-level data.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use crate::registry::reference::{RecordRef, require_record_owner};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AccessGrant {
    pub viewer: Principal,
    pub access_level: String,
    pub granted_by: Principal,
}

/// Grant (or re-grant) a viewer access to a record. Owner-only; re-granting
/// overwrites the stored access level.
pub fn authorize_viewer(
    root: &Path,
    caller: &Principal,
    record: RecordRef,
    viewer: &Principal,
    access_level: &str,
) -> Result<(), error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "access.authorize", |conn| {
        let tx = conn.transaction()?;
        require_record_owner(&tx, record, caller)?;
        tx.execute(
            "INSERT INTO access_grants(target_kind, target_id, viewer, access_level, granted_by)
             VALUES(?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(target_kind, target_id, viewer)
             DO UPDATE SET access_level = excluded.access_level,
                           granted_by = excluded.granted_by",
            params![
                record.kind.as_str(),
                record.id,
                viewer.as_str(),
                access_level,
                caller.as_str(),
            ],
        )?;
        tx.commit()?;
        Ok(())
    })
}

/// Revoke a viewer's grant. Owner-only; revoking an absent grant succeeds.
pub fn withdraw_viewer_access(
    root: &Path,
    caller: &Principal,
    record: RecordRef,
    viewer: &Principal,
) -> Result<(), error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "access.withdraw", |conn| {
        let tx = conn.transaction()?;
        require_record_owner(&tx, record, caller)?;
        tx.execute(
            "DELETE FROM access_grants
             WHERE target_kind = ?1 AND target_id = ?2 AND viewer = ?3",
            params![record.kind.as_str(), record.id, viewer.as_str()],
        )?;
        tx.commit()?;
        Ok(())
    })
}

/// Grant-presence check. Read-only; absent is `None`, never an error.
pub fn fetch_access_grant(
    root: &Path,
    record: RecordRef,
    viewer: &Principal,
) -> Result<Option<AccessGrant>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "access.fetch", |conn| {
        conn.query_row(
            "SELECT viewer, access_level, granted_by FROM access_grants
             WHERE target_kind = ?1 AND target_id = ?2 AND viewer = ?3",
            params![record.kind.as_str(), record.id, viewer.as_str()],
            |row| {
                Ok(AccessGrant {
                    viewer: Principal::new(row.get::<_, String>(0)?),
                    access_level: row.get(1)?,
                    granted_by: Principal::new(row.get::<_, String>(2)?),
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}
