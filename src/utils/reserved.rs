//! Reserved short codes shared by the engine and the link-management surface.
//!
//! The redirect engine uses this set to decide whether a same-host path can be
//! another short link at all; the external CRUD surface uses it to reject
//! reserved identifiers at creation time. Keeping one constant set avoids the
//! two lists drifting apart.

/// Identifiers that can never be short codes.
///
/// Sorted so membership checks can use binary search.
pub const RESERVED_CODES: &[&str] = &[
    "about",
    "admin",
    "all",
    "analytics",
    "api",
    "assets",
    "contact",
    "create",
    "dashboard",
    "delete",
    "disclaimer",
    "docs",
    "edit",
    "favicon.ico",
    "health",
    "help",
    "home",
    "index",
    "list",
    "login",
    "logout",
    "new",
    "privacy",
    "profile",
    "r",
    "redirect",
    "robots.txt",
    "settings",
    "sign-in",
    "sign-up",
    "sitemap.xml",
    "static",
    "terms",
    "update",
    "webhooks",
];

/// Returns true if `code` is a reserved identifier (case-insensitive).
pub fn is_reserved(code: &str) -> bool {
    let lowered = code.to_ascii_lowercase();
    RESERVED_CODES.binary_search(&lowered.as_str()).is_ok()
}

/// Validates a candidate short code: alphanumeric and not reserved.
///
/// Shared with the link-management surface. The engine rejects path segments
/// failing this check before any store round-trip.
pub fn validate_short_code(code: &str) -> bool {
    !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric()) && !is_reserved(code)
}
