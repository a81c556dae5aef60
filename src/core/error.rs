use rusqlite;
use std::io;
use thiserror::Error;

/// Registry error taxonomy. Domain failures carry stable numeric codes
/// surfaced verbatim to callers; infrastructure failures wrap their source.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("SQLite error: {0}")]
    RusqliteError(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("not authorized: caller lacks ownership or role for the target record")]
    NotAuthorized,
    #[error("already registered: caller holds a profile of this kind")]
    AlreadyRegistered,
    #[error("not a certifier: caller holds no certifier profile")]
    NotCertifier,
    #[error("not found: {0}")]
    NotFound(String),
}

impl LedgerError {
    /// Stable error code for domain failures. Infrastructure errors have none.
    pub fn code(&self) -> Option<u32> {
        match self {
            LedgerError::NotAuthorized => Some(100),
            LedgerError::AlreadyRegistered => Some(102),
            LedgerError::NotCertifier => Some(107),
            _ => None,
        }
    }
}
