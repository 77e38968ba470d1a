//! Bounded detection of redirect loops across chained short links.
//!
//! Short links may point at other short links on the same host. Two links
//! referencing each other would send a visitor into an infinite redirect
//! loop, and such loops can be constructed deliberately. Before committing to
//! a redirect the engine walks the same-host chain with a visited set and a
//! hard depth bound.

use std::collections::HashSet;
use std::sync::Arc;

use url::Url;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::reserved::is_reserved;
use crate::utils::url_norm::{host_matches, parse_destination, single_path_segment};

/// Maximum chain hops walked before giving up.
///
/// Exceeding the bound without revisiting a node reports "no cycle": a
/// bounded false-negative beats unbounded store traversal.
pub const MAX_CHAIN_DEPTH: usize = 5;

/// Walks same-host short-link chains looking for loops.
pub struct CycleDetector {
    links: Arc<dyn LinkRepository>,
}

impl CycleDetector {
    pub fn new(links: Arc<dyn LinkRepository>) -> Self {
        Self { links }
    }

    /// Reports whether following `first_destination` from `start_code` would
    /// loop back to an already-visited short code.
    ///
    /// Cross-host destinations are never followed: the walk ends immediately
    /// as "no cycle". A referenced code that does not exist (or is expired)
    /// breaks the chain, also "no cycle".
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when a store lookup fails mid-walk.
    pub async fn has_cycle(
        &self,
        start_code: &str,
        first_destination: &Url,
        request_host: &str,
    ) -> Result<bool, AppError> {
        let mut visited = HashSet::from([start_code.to_string()]);
        let mut destination = first_destination.clone();

        for _ in 0..MAX_CHAIN_DEPTH {
            let Some(candidate) = next_hop_code(&destination, request_host) else {
                return Ok(false);
            };

            if !visited.insert(candidate.clone()) {
                return Ok(true);
            }

            let Some(record) = self.links.find_by_code(&candidate).await? else {
                return Ok(false);
            };
            if record.is_expired() {
                return Ok(false);
            }

            destination = match parse_destination(&record.destination) {
                Ok(url) => url,
                // Malformed link mid-chain: the chain is broken, not cyclic.
                Err(_) => return Ok(false),
            };
        }

        Ok(false)
    }
}

/// Extracts the short code a destination would resolve to next, if any.
///
/// Only single-segment paths on the serving host qualify; reserved
/// identifiers are routes of this service, never short codes.
fn next_hop_code(destination: &Url, request_host: &str) -> Option<String> {
    if !host_matches(destination, request_host) {
        return None;
    }
    let segment = single_path_segment(destination)?;
    if is_reserved(segment) {
        return None;
    }
    Some(segment.to_string())
}
