//! Client operating-system classification from the User-Agent header.
//!
//! The classification is advisory only: it decides which URL string is handed
//! back, never whether access is authorized. The header is attacker-controlled
//! and must not be treated as a security boundary.

/// Coarse operating-system classification of the visiting client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOs {
    Ios,
    Android,
    Other,
}

/// Classifies a raw User-Agent string.
///
/// Unknown, empty or missing user agents classify as [`ClientOs::Other`],
/// which leaves the destination untouched downstream.
pub fn classify(user_agent: Option<&str>) -> ClientOs {
    let Some(ua) = user_agent else {
        return ClientOs::Other;
    };
    let ua = ua.to_ascii_lowercase();

    if ua.contains("iphone") || ua.contains("ipad") || ua.contains("ipod") {
        ClientOs::Ios
    } else if ua.contains("android") {
        ClientOs::Android
    } else {
        ClientOs::Other
    }
}
