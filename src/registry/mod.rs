//! Registry domains: identity profiles, land plots, crop cycles, production
//! records, attestations, and the cross-entity access-control layer.

pub mod access;
pub mod attestations;
pub mod cycles;
pub mod identity;
pub mod plots;
pub mod production;
pub mod reference;
