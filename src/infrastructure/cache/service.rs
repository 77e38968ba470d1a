//! Cache service trait, payload and error types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug)]
pub enum CacheError {
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Structured cache payload for a short code.
///
/// Written by the link-management surface as JSON
/// (`{"longUrl": …, "hasPassword": …}`); entries written before the password
/// feature are bare destination strings and decode via [`CachedLink::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedLink {
    #[serde(rename = "longUrl")]
    pub destination: String,
    #[serde(rename = "hasPassword", default)]
    pub has_password: bool,
}

impl CachedLink {
    /// Decodes a raw cache value, falling back to the legacy bare-string form.
    pub fn from_raw(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_else(|_| Self {
            destination: raw.to_string(),
            has_password: false,
        })
    }

    /// Encodes the payload for storage.
    pub fn to_raw(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.destination.clone())
    }
}

/// Fast-cache capability consumed by the redirect engine.
///
/// This store is authoritative for liveness: a short code with no cache entry
/// is not servable, regardless of the durable record. The durable store
/// remains authoritative for metadata (password digest, expiry).
///
/// Implementations must be thread-safe and fail open: errors are logged and
/// surface as misses rather than disrupting the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves the cached payload for a short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(link))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>>;

    /// Stores a payload with optional TTL in seconds.
    ///
    /// Population is owned by the link-management surface; the engine only
    /// calls this from tests and tooling.
    async fn set_link(
        &self,
        short_code: &str,
        link: &CachedLink,
        ttl_seconds: Option<usize>,
    ) -> CacheResult<()>;

    /// Removes a cached payload. Used when collecting expired tombstones.
    async fn invalidate(&self, short_code: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
