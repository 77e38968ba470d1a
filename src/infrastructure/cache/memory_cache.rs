//! In-process cache implementation for deployments without Redis.

use super::service::{CacheResult, CacheService, CachedLink};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::debug;

/// A process-local cache backed by a mutex-guarded map.
///
/// The fast cache is authoritative for liveness, so disabling caching
/// outright would make every link unresolvable. When Redis is not configured
/// this implementation stands in, with the caveat that it starts empty and is
/// only populated by whatever writes through this process.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (CachedLink, Option<Instant>)>>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates an empty in-process cache with the given default TTL.
    pub fn new(default_ttl_seconds: u64) -> Self {
        debug!("Using MemoryCache (Redis not configured)");
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl: Duration::from_secs(default_ttl_seconds),
        }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_link(&self, short_code: &str) -> CacheResult<Option<CachedLink>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        match entries.get(short_code) {
            Some((_, Some(deadline))) if *deadline <= Instant::now() => {
                entries.remove(short_code);
                Ok(None)
            }
            Some((link, _)) => Ok(Some(link.clone())),
            None => Ok(None),
        }
    }

    async fn set_link(
        &self,
        short_code: &str,
        link: &CachedLink,
        ttl: Option<usize>,
    ) -> CacheResult<()> {
        let ttl = ttl
            .map(|secs| Duration::from_secs(secs as u64))
            .unwrap_or(self.default_ttl);
        let deadline = Instant::now().checked_add(ttl);

        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(short_code.to_string(), (link.clone(), deadline));
        Ok(())
    }

    async fn invalidate(&self, short_code: &str) -> CacheResult<()> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .remove(short_code);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
