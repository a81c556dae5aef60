//! Certifier attestations.
//!
//! Append-only statements about a (kind, id) record, gated on certifier
//! registration rather than record ownership. The target is not checked for
//! existence: a certifier may lodge an attestation ahead of the record it
//! describes, and the registry never exposes an update or revoke path.

use crate::core::broker::LedgerBroker;
use crate::core::db;
use crate::core::error;
use crate::core::principal::Principal;
use crate::core::time;
use crate::registry::identity;
use crate::registry::reference::{RecordKind, RecordRef};
use rusqlite::{OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Attestation {
    pub attestation_id: u64,
    pub target_kind: RecordKind,
    pub target_id: u64,
    pub status: String,
    pub remarks: String,
    pub certifier: Principal,
    pub recorded_at: String,
}

/// Lodge an attestation against a record reference. Certifier-only.
pub fn lodge_attestation(
    root: &Path,
    caller: &Principal,
    target: RecordRef,
    status: &str,
    remarks: &str,
) -> Result<u64, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, caller.as_str(), "attestations.lodge", |conn| {
        let tx = conn.transaction()?;
        if !identity::certifier_exists(&tx, caller)? {
            return Err(error::LedgerError::NotCertifier);
        }
        let attestation_id = db::next_record_id(&tx, "attestation")?;
        tx.execute(
            "INSERT INTO attestations(attestation_id, target_kind, target_id, status, remarks, certifier, recorded_at)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                attestation_id,
                target.kind.as_str(),
                target.id,
                status,
                remarks,
                caller.as_str(),
                time::now_epoch_z(),
            ],
        )?;
        tx.commit()?;
        Ok(attestation_id)
    })
}

pub fn fetch_attestation_data(
    root: &Path,
    attestation_id: u64,
) -> Result<Option<Attestation>, error::LedgerError> {
    let broker = LedgerBroker::new(root);
    let db_path = db::ledger_db_path(root);

    broker.with_conn(&db_path, "ledger", "attestations.fetch", |conn| {
        conn.query_row(
            "SELECT attestation_id, target_kind, target_id, status, remarks, certifier, recorded_at
             FROM attestations WHERE attestation_id = ?1",
            params![attestation_id],
            |row| {
                let tag: String = row.get(1)?;
                let target_kind = RecordKind::from_tag(&tag).ok_or_else(|| {
                    rusqlite::Error::FromSqlConversionFailure(
                        1,
                        rusqlite::types::Type::Text,
                        format!("unknown record kind tag: {tag}").into(),
                    )
                })?;
                Ok(Attestation {
                    attestation_id: row.get(0)?,
                    target_kind,
                    target_id: row.get(2)?,
                    status: row.get(3)?,
                    remarks: row.get(4)?,
                    certifier: Principal::new(row.get::<_, String>(5)?),
                    recorded_at: row.get(6)?,
                })
            },
        )
        .optional()
        .map_err(error::LedgerError::RusqliteError)
    })
}
