//! Infrastructure layer for external integrations.
//!
//! Implements the two named store capabilities consumed by the resolver:
//!
//! - [`cache`] - Fast cache, authoritative for redirect liveness
//! - [`persistence`] - Durable store, authoritative for link metadata

pub mod cache;
pub mod persistence;
