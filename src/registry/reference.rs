//! Polymorphic record addressing.
//!
//! Attestations and access grants target records of three different shapes.
//! A `RecordRef` is the tagged (kind, id) pair they share, and
//! `resolve_record_owner` is the single per-kind ownership dispatch used by
//! every cross-entity authorization check.

use crate::core::error;
use crate::core::principal::Principal;
use clap::ValueEnum;
use rusqlite::{Connection, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three record kinds addressable by attestations and access grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Plot,
    Cycle,
    Production,
}

impl RecordKind {
    /// Stable tag stored in the `target_kind` columns.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Plot => "plot",
            RecordKind::Cycle => "cycle",
            RecordKind::Production => "production",
        }
    }

    /// Inverse of [`RecordKind::as_str`]; `None` for an unknown tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "plot" => Some(RecordKind::Plot),
            "cycle" => Some(RecordKind::Cycle),
            "production" => Some(RecordKind::Production),
            _ => None,
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (kind, id) reference to one record in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordRef {
    pub kind: RecordKind,
    pub id: u64,
}

impl RecordRef {
    pub fn new(kind: RecordKind, id: u64) -> Self {
        RecordRef { kind, id }
    }
}

impl fmt::Display for RecordRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.id)
    }
}

/// Resolve the owning principal of a record: plots directly, cycles and
/// production records transitively through their plot. `None` means the
/// record does not exist; authorization sites collapse that into
/// `NotAuthorized` rather than reporting a separate not-found condition.
pub fn resolve_record_owner(
    conn: &Connection,
    record: RecordRef,
) -> Result<Option<Principal>, error::LedgerError> {
    let owner: Option<String> = match record.kind {
        RecordKind::Plot => conn
            .query_row(
                "SELECT owner FROM plots WHERE plot_id = ?1",
                params![record.id],
                |row| row.get(0),
            )
            .optional()?,
        RecordKind::Cycle => conn
            .query_row(
                "SELECT p.owner FROM crop_cycles c
                 JOIN plots p ON p.plot_id = c.plot_id
                 WHERE c.cycle_id = ?1",
                params![record.id],
                |row| row.get(0),
            )
            .optional()?,
        RecordKind::Production => conn
            .query_row(
                "SELECT p.owner FROM production_records r
                 JOIN crop_cycles c ON c.cycle_id = r.cycle_id
                 JOIN plots p ON p.plot_id = c.plot_id
                 WHERE r.record_id = ?1",
                params![record.id],
                |row| row.get(0),
            )
            .optional()?,
    };
    Ok(owner.map(Principal::new))
}

/// Ownership predicate shared by the cycle, production, and access-control
/// entry points: the record must exist and its owner must equal the caller.
pub fn require_record_owner(
    conn: &Connection,
    record: RecordRef,
    caller: &Principal,
) -> Result<(), error::LedgerError> {
    match resolve_record_owner(conn, record)? {
        Some(owner) if owner == *caller => Ok(()),
        _ => Err(error::LedgerError::NotAuthorized),
    }
}
