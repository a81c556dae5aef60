//! Caller identity.
//!
//! The enclosing environment supplies the identity behind every operation.
//! The registry never reads it from ambient state: each entry point takes a
//! `Principal` parameter, so an operation is a pure function of
//! (stored tables, caller, arguments).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque caller identity (wallet address, account id, service name).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Principal(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Principal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("principal must not be empty".to_string());
        }
        Ok(Principal(trimmed.to_string()))
    }
}
