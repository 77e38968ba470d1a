//! Password gate for protected links.
//!
//! A protected link stores a one-way SHA-256 digest of its password. Visitors
//! prove knowledge of the password once per hour: a successful submission sets
//! a cookie whose value is a fixed-length prefix of the stored digest, so
//! later visits can be checked without a store round-trip. The token is bound
//! to exactly one short code through the cookie name.

use sha2::{Digest, Sha256};

/// Cookie name prefix; the full name is `pw_<short code>`.
pub const COOKIE_PREFIX: &str = "pw_";

/// Length of the digest prefix used as the access token.
pub const ACCESS_TOKEN_LEN: usize = 16;

/// Access cookie lifetime in seconds.
pub const COOKIE_MAX_AGE_SECS: u64 = 3600;

/// Computes the hex-encoded SHA-256 digest of a plaintext password.
pub fn password_digest(plaintext: &str) -> String {
    let digest = Sha256::digest(plaintext.as_bytes());
    hex::encode(digest)
}

/// Verifies a submitted plaintext against the stored digest.
///
/// A mismatch is an ordinary outcome, not a fault.
pub fn verify_password(submitted: &str, stored_digest: &str) -> bool {
    password_digest(submitted) == stored_digest
}

/// Derives the access token from a stored digest.
///
/// The token is deterministic so validity can be checked against the record
/// alone; it is non-reversible because it is a digest prefix.
pub fn derive_access_token(stored_digest: &str) -> &str {
    &stored_digest[..ACCESS_TOKEN_LEN.min(stored_digest.len())]
}

/// Builds the `Set-Cookie` value granting access to one short code.
///
/// Path `/`, HTTP-only, `SameSite=Lax`, finite max-age, `Secure` when served
/// over an encrypted transport. There is no explicit revoke; the cookie
/// simply expires.
pub fn access_cookie(code: &str, stored_digest: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{}{}={}; Path=/; HttpOnly; Max-Age={}; SameSite=Lax",
        COOKIE_PREFIX,
        code,
        derive_access_token(stored_digest),
        COOKIE_MAX_AGE_SECS
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Checks an incoming `Cookie` header for a valid token bound to `code`.
///
/// Absence or mismatch means the password wall must be shown; it is never an
/// error.
pub fn has_valid_token(cookie_header: Option<&str>, code: &str, stored_digest: &str) -> bool {
    let Some(header) = cookie_header else {
        return false;
    };
    let name = format!("{}{}", COOKIE_PREFIX, code);
    let expected = derive_access_token(stored_digest);

    header.split(';').any(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        parts.next() == Some(name.as_str()) && parts.next() == Some(expected)
    })
}
