//! Link record entity: the canonical short-code to destination mapping.

use chrono::{DateTime, Utc};

/// A short link as stored in the durable store.
///
/// The short code is immutable once assigned; a rename is modeled by the
/// management surface as delete plus recreate. `destination` may be stored
/// without a scheme and is normalized to `http://` at resolution time.
#[derive(Debug, Clone)]
pub struct LinkRecord {
    pub code: String,
    pub destination: String,
    /// Creating account. Only the management surface cares about this.
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    /// Hex-encoded SHA-256 digest of the link password; `None` means public.
    pub password_digest: Option<String>,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    /// Returns true once the expiry timestamp has passed.
    ///
    /// An expired record is a tombstone: it must never be redirected to and
    /// awaits deletion.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|e| Utc::now() >= e)
    }

    /// Returns true when the link requires a password to resolve.
    pub fn has_password(&self) -> bool {
        self.password_digest.is_some()
    }
}

/// Input data for appending a click row.
#[derive(Debug, Clone)]
pub struct NewClick {
    pub code: String,
    pub clicked_at: DateTime<Utc>,
    pub user_agent: Option<String>,
    pub country: Option<String>,
}
