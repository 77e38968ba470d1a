//! Core domain entities representing the engine's data model.
//!
//! Entities are plain data structures without business logic.
//!
//! - [`LinkRecord`] - A short link as stored durably
//! - [`NewClick`] - A click row awaiting insertion

pub mod link;

pub use link::{LinkRecord, NewClick};
