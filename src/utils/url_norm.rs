//! Destination normalization and validation.
//!
//! Stored destinations may lack a scheme entirely (bare host/path). The engine
//! normalizes those to `http://` before validating, mirroring what the
//! link-creation surface accepts.

use url::Url;

/// Errors produced while turning a stored destination into a servable URL.
#[derive(Debug, thiserror::Error)]
pub enum DestinationError {
    #[error("Stored destination is not a well-formed URL: {0}")]
    Malformed(String),
}

/// Prefixes `http://` when the stored destination has no scheme.
///
/// Only `http://` and `https://` are recognized as already-schemed; anything
/// else is treated as a bare host/path.
pub fn ensure_scheme(destination: &str) -> String {
    if destination.starts_with("http://") || destination.starts_with("https://") {
        destination.to_string()
    } else {
        format!("http://{}", destination)
    }
}

/// Normalizes and validates a stored destination.
///
/// # Errors
///
/// Returns [`DestinationError::Malformed`] when the normalized string does not
/// parse as a URL. This is stored-data corruption, not visitor input.
pub fn parse_destination(destination: &str) -> Result<Url, DestinationError> {
    let normalized = ensure_scheme(destination);
    Url::parse(&normalized).map_err(|e| DestinationError::Malformed(e.to_string()))
}

/// Compares a destination host against the serving host, ignoring case and port.
pub fn host_matches(url: &Url, request_host: &str) -> bool {
    let request_host = request_host
        .split(':')
        .next()
        .unwrap_or(request_host)
        .to_ascii_lowercase();

    if request_host.is_empty() {
        return false;
    }

    url.host_str()
        .is_some_and(|h| h.to_ascii_lowercase() == request_host)
}

/// Extracts the single path segment of `url` with surrounding slashes stripped,
/// or `None` when the path is empty or has multiple segments.
pub fn single_path_segment(url: &Url) -> Option<&str> {
    let trimmed = url.path().trim_matches('/');
    if trimmed.is_empty() || trimmed.contains('/') {
        None
    } else {
        Some(trimmed)
    }
}

/// Returns true when `url` points back at `code` on the serving host.
pub fn is_self_referential(url: &Url, code: &str, request_host: &str) -> bool {
    host_matches(url, request_host) && single_path_segment(url) == Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme_bare_host() {
        assert_eq!(ensure_scheme("example.com/page"), "http://example.com/page");
    }

    #[test]
    fn test_ensure_scheme_already_http() {
        assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
        assert_eq!(ensure_scheme("https://example.com"), "https://example.com");
    }

    #[test]
    fn test_parse_destination_valid() {
        let url = parse_destination("example.com/a?b=c").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_parse_destination_malformed() {
        assert!(parse_destination("http://").is_err());
        assert!(parse_destination("").is_err());
    }

    #[test]
    fn test_host_matches_ignores_port_and_case() {
        let url = Url::parse("https://Short.Example.com/abc").unwrap();
        assert!(host_matches(&url, "short.example.com:8080"));
        assert!(host_matches(&url, "SHORT.EXAMPLE.COM"));
        assert!(!host_matches(&url, "other.example.com"));
        assert!(!host_matches(&url, ""));
    }

    #[test]
    fn test_single_path_segment() {
        let url = Url::parse("https://s.example.com/abc/").unwrap();
        assert_eq!(single_path_segment(&url), Some("abc"));

        let root = Url::parse("https://s.example.com/").unwrap();
        assert_eq!(single_path_segment(&root), None);

        let nested = Url::parse("https://s.example.com/a/b").unwrap();
        assert_eq!(single_path_segment(&nested), None);
    }

    #[test]
    fn test_is_self_referential() {
        let url = Url::parse("https://s.example.com/mycode").unwrap();
        assert!(is_self_referential(&url, "mycode", "s.example.com"));
        assert!(!is_self_referential(&url, "other", "s.example.com"));
        assert!(!is_self_referential(&url, "mycode", "elsewhere.com"));
    }
}
