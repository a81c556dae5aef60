use crate::core::db;
use crate::core::error;
use crate::core::time;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// The Ledger Broker is the single gate for state access.
/// It serializes operations behind an in-process lock (the registry's
/// execution model is one operation at a time, fully serialized) and
/// appends an audit event for every brokered operation.
pub struct LedgerBroker {
    audit_log_path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LedgerEvent {
    pub ts: String,
    pub event_id: String,
    pub caller: String,
    pub op: String,
    pub status: String,
}

impl LedgerBroker {
    pub fn new(root: &Path) -> Self {
        Self {
            audit_log_path: root.join("ledger.events.jsonl"),
        }
    }

    /// Execute a closure with a serialized, mutable connection to the ledger
    /// database. The mutable borrow lets operations open a transaction, so
    /// every read-check-write sequence commits atomically or not at all.
    pub fn with_conn<F, R>(
        &self,
        db_path: &Path,
        caller: &str,
        op_name: &str,
        f: F,
    ) -> Result<R, error::LedgerError>
    where
        F: FnOnce(&mut Connection) -> Result<R, error::LedgerError>,
    {
        static DB_LOCK: Mutex<()> = Mutex::new(());
        let _lock = DB_LOCK.lock().unwrap();

        let mut conn = db::db_connect(&db_path.to_string_lossy())?;
        let result = f(&mut conn);

        let status = if result.is_ok() { "success" } else { "error" };
        self.log_event(caller, op_name, status)?;

        result
    }

    fn log_event(&self, caller: &str, op: &str, status: &str) -> Result<(), error::LedgerError> {
        use std::fs::OpenOptions;
        use std::io::Write;

        let ev = LedgerEvent {
            ts: time::now_epoch_z(),
            event_id: time::new_event_id(),
            caller: caller.to_string(),
            op: op.to_string(),
            status: status.to_string(),
        };

        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.audit_log_path)
            .map_err(error::LedgerError::IoError)?;

        writeln!(f, "{}", serde_json::to_string(&ev).unwrap())
            .map_err(error::LedgerError::IoError)?;
        Ok(())
    }
}
