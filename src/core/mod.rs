//! Core plumbing shared by every registry domain: error taxonomy, the
//! serialized database broker, schema definitions, and caller identity.

pub mod broker;
pub mod db;
pub mod error;
pub mod principal;
pub mod schemas;
pub mod time;
