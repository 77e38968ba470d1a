//! Repository trait for the durable link store.

use crate::domain::entities::{LinkRecord, NewClick};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store capability consumed by the redirect engine.
///
/// Holds authoritative link metadata (password digest, expiry). Liveness for
/// redirection is owned by the fast cache, not this store: see
/// [`crate::infrastructure::cache::CacheService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Point lookup by short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(record))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<LinkRecord>, AppError>;

    /// Deletes a record by short code.
    ///
    /// Idempotent: deleting a missing record returns `Ok(false)` and is
    /// harmless, so concurrent tombstone collection never conflicts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Appends a click row. Append-only; click rows are never mutated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn record_click(&self, click: NewClick) -> Result<(), AppError>;

    /// Updates the last-accessed timestamp of a link to now.
    ///
    /// Concurrent updates race benignly: ordering has no correctness
    /// dependency.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn touch_last_accessed(&self, code: &str) -> Result<(), AppError>;

    /// Checks whether the backing store is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
