//! Host extraction from HTTP request headers.

use crate::AppError;
use axum::http::{HeaderMap, header};

/// Extracts the serving host from the `Host` header.
///
/// Port numbers are stripped; IPv6 literals keep their brackets. The host is
/// needed to decide whether a destination points back into this service
/// (self-reference and cycle checks).
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the header is missing or not UTF-8.
pub fn extract_host_from_headers(headers: &HeaderMap) -> Result<String, AppError> {
    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::bad_request("Missing Host header", serde_json::json!({})))?
        .to_str()
        .map_err(|_| AppError::bad_request("Invalid Host header", serde_json::json!({})))?;

    let host = if host.starts_with('[') {
        // IPv6 literal, e.g. [::1]:8080
        match host.find(']') {
            Some(end_bracket) => host[..=end_bracket].to_string(),
            None => host.to_string(),
        }
    } else {
        host.split(':').next().unwrap_or(host).to_string()
    };

    Ok(host)
}
