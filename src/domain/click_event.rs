//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// Longest user-agent string persisted with a click.
pub const MAX_USER_AGENT_LEN: usize = 500;

/// An in-memory click event passed from the redirect handler to the
/// background worker over a channel, decoupling the HTTP response from
/// database writes.
///
/// No raw client IP is carried or persisted; geolocation is limited to a
/// coarse country code taken from the edge proxy.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub user_agent: Option<String>,
    pub country: Option<String>,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a new click event, truncating the user agent to
    /// [`MAX_USER_AGENT_LEN`] bytes on a character boundary.
    pub fn new(code: String, user_agent: Option<&str>, country: Option<&str>) -> Self {
        Self {
            code,
            user_agent: user_agent.map(truncate_user_agent),
            country: country.map(str::to_string),
            clicked_at: Utc::now(),
        }
    }
}

fn truncate_user_agent(ua: &str) -> String {
    if ua.len() <= MAX_USER_AGENT_LEN {
        return ua.to_string();
    }
    let mut end = MAX_USER_AGENT_LEN;
    while !ua.is_char_boundary(end) {
        end -= 1;
    }
    ua[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let event = ClickEvent::new("abc123".to_string(), Some("Mozilla/5.0"), Some("DE"));

        assert_eq!(event.code, "abc123");
        assert_eq!(event.user_agent, Some("Mozilla/5.0".to_string()));
        assert_eq!(event.country, Some("DE".to_string()));
    }

    #[test]
    fn test_click_event_minimal() {
        let event = ClickEvent::new("xyz".to_string(), None, None);

        assert_eq!(event.code, "xyz");
        assert!(event.user_agent.is_none());
        assert!(event.country.is_none());
    }

    #[test]
    fn test_user_agent_truncated() {
        let long_ua = "a".repeat(2 * MAX_USER_AGENT_LEN);
        let event = ClickEvent::new("c".to_string(), Some(&long_ua), None);

        assert_eq!(event.user_agent.unwrap().len(), MAX_USER_AGENT_LEN);
    }

    #[test]
    fn test_user_agent_truncation_respects_char_boundary() {
        let ua = format!("{}\u{30c6}\u{30b9}\u{30c8}", "a".repeat(MAX_USER_AGENT_LEN - 1));
        let event = ClickEvent::new("c".to_string(), Some(&ua), None);

        let stored = event.user_agent.unwrap();
        assert!(stored.len() <= MAX_USER_AGENT_LEN);
        assert!(stored.is_char_boundary(stored.len()));
    }
}
