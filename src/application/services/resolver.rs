//! Redirect resolution state machine.
//!
//! One visit runs through a fixed pipeline: durable lookup, expiry check,
//! destination resolve against the fast cache, password gate, self-reference
//! guard, cycle check, client-aware rewrite. The same pipeline serves plain
//! GET visits and POST password submissions; the latter verifies the password
//! first and then re-enters at the destination-resolve step.
//!
//! Unknown codes, missing cache entries, self-references and detected cycles
//! all terminate as `NotFound` so responses never reveal link-graph
//! structure.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, error, warn};

use crate::application::services::access_control;
use crate::application::services::cycle_detector::CycleDetector;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::utils::client::classify;
use crate::utils::rewrite::rewrite_destination;
use crate::utils::url_norm::{is_self_referential, parse_destination};

/// Typed descriptor of one incoming visit.
///
/// Built by the HTTP handler from the request; the resolver never touches
/// ambient request state.
#[derive(Debug, Clone)]
pub struct Visit {
    pub code: String,
    /// Serving host, port stripped. Needed for self-reference and cycle checks.
    pub host: String,
    pub user_agent: Option<String>,
    pub cookie_header: Option<String>,
    /// Coarse geolocation from the edge proxy, e.g. `CF-IPCountry`.
    pub country: Option<String>,
}

/// Successful outcome of a resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Redirect the visitor to `target` (already rewritten for the client).
    Redirect { target: String },
    /// The link is password-protected and no valid access token was
    /// presented. Recoverable: the visitor submits the password.
    RequiresPassword { code: String },
}

/// Orchestrates the per-visit resolution pipeline over the two stores.
pub struct Resolver {
    links: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
    cycle_detector: CycleDetector,
}

impl Resolver {
    pub fn new(links: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        let cycle_detector = CycleDetector::new(links.clone());
        Self {
            links,
            cache,
            cycle_detector,
        }
    }

    /// Resolves a plain GET visit.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] - unknown code, missing cache entry,
    ///   self-reference or detected cycle
    /// - [`AppError::Gone`] - the record expired; cleanup runs in background
    /// - [`AppError::Internal`] - the stored destination is malformed, or a
    ///   store failed mid-pipeline
    pub async fn resolve(&self, visit: &Visit) -> Result<Resolution, AppError> {
        let record = self.lookup(&visit.code).await?;
        self.resolve_from_record(&record, visit, false).await
    }

    /// Resolves a POST password submission.
    ///
    /// Verifies the submitted plaintext against the stored digest, then
    /// re-enters the pipeline at the destination-resolve step. On success the
    /// returned cookie string grants access for subsequent visits.
    ///
    /// # Errors
    ///
    /// In addition to the [`Self::resolve`] outcomes, returns
    /// [`AppError::Unauthorized`] when the password does not match.
    pub async fn resolve_with_password(
        &self,
        visit: &Visit,
        password: &str,
        secure_transport: bool,
    ) -> Result<(Resolution, Option<String>), AppError> {
        let record = self.lookup(&visit.code).await?;

        let cookie = match record.password_digest.as_deref() {
            Some(digest) => {
                if !access_control::verify_password(password, digest) {
                    return Err(AppError::unauthorized("Invalid password"));
                }
                Some(access_control::access_cookie(
                    &visit.code,
                    digest,
                    secure_transport,
                ))
            }
            // Public link: a submitted password is ignored, no cookie needed.
            None => None,
        };

        let resolution = self.resolve_from_record(&record, visit, true).await?;
        Ok((resolution, cookie))
    }

    /// Steps 1-2: durable lookup and expiry check.
    async fn lookup(&self, code: &str) -> Result<LinkRecord, AppError> {
        let record = self
            .links
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({})))?;

        if record.is_expired() {
            debug!("Collecting expired link {}", code);
            self.collect_tombstone(code);
            return Err(AppError::gone("Short link expired", json!({})));
        }

        Ok(record)
    }

    /// Steps 3-7 of the pipeline, shared between GET and POST entry points.
    async fn resolve_from_record(
        &self,
        record: &LinkRecord,
        visit: &Visit,
        password_verified: bool,
    ) -> Result<Resolution, AppError> {
        // The fast cache owns liveness: a durable record without a cache
        // entry is not servable.
        let cached = match self.cache.get_link(&visit.code).await {
            Ok(Some(cached)) => cached,
            Ok(None) => {
                debug!("No cache entry for {}", visit.code);
                return Err(AppError::not_found("Short link not found", json!({})));
            }
            Err(e) => {
                warn!("Cache lookup failed for {}: {}", visit.code, e);
                return Err(AppError::not_found("Short link not found", json!({})));
            }
        };

        // Prefer the cached destination when the payload agrees with the
        // durable record about password protection; otherwise the cache is
        // stale and the durable copy wins.
        let destination = if cached.has_password == record.has_password() {
            cached.destination.as_str()
        } else {
            record.destination.as_str()
        };

        let destination = parse_destination(destination).map_err(|e| {
            error!("Invalid stored destination for {}: {}", visit.code, e);
            AppError::internal("Invalid stored destination", json!({}))
        })?;

        if record.has_password()
            && !password_verified
            && !access_control::has_valid_token(
                visit.cookie_header.as_deref(),
                &visit.code,
                record.password_digest.as_deref().unwrap_or_default(),
            )
        {
            return Ok(Resolution::RequiresPassword {
                code: visit.code.clone(),
            });
        }

        if is_self_referential(&destination, &visit.code, &visit.host) {
            debug!("Link {} points at itself", visit.code);
            return Err(AppError::not_found("Short link not found", json!({})));
        }

        let cyclic = self
            .cycle_detector
            .has_cycle(&visit.code, &destination, &visit.host)
            .await
            .map_err(|e| {
                warn!("Cycle walk failed for {}: {:?}", visit.code, e);
                AppError::not_found("Short link not found", json!({}))
            })?;
        if cyclic {
            debug!("Redirect cycle detected starting at {}", visit.code);
            return Err(AppError::not_found("Short link not found", json!({})));
        }

        let os = classify(visit.user_agent.as_deref());
        let target = rewrite_destination(&destination, os);

        Ok(Resolution::Redirect { target })
    }

    /// Schedules idempotent deletion of an expired record from both stores.
    ///
    /// Best-effort: runs after the response, may be abandoned, and concurrent
    /// duplicate deletes are harmless.
    fn collect_tombstone(&self, code: &str) {
        let links = self.links.clone();
        let cache = self.cache.clone();
        let code = code.to_string();

        tokio::spawn(async move {
            if let Err(e) = links.delete(&code).await {
                warn!("Tombstone delete failed for {}: {}", code, e);
            }
            if let Err(e) = cache.invalidate(&code).await {
                warn!("Tombstone cache invalidation failed for {}: {}", code, e);
            }
        });
    }
}
