//! Handlers for short link visits and password submissions.

use axum::{
    Json,
    extract::{Form, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::application::services::{Resolution, Visit};
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_domain::extract_host_from_headers;
use crate::utils::reserved::validate_short_code;

/// Resolves a short code and redirects the visitor.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Responses
///
/// - `302` with a rewritten destination and cache-suppressing headers
/// - `200` with `{"requiresPassword": true, "shortCode": …}` when the link is
///   protected and no valid access cookie was presented
/// - `404` for unknown codes, self-references and detected cycles
/// - `410` when the record expired (cleanup runs in background)
/// - `500` when the stored destination is malformed
///
/// # Click Tracking
///
/// On a successful redirect a click event is sent to a bounded channel for
/// async processing. If the queue is full the click is dropped
/// (fire-and-forget); the response never waits on the recorder.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let visit = build_visit(code, &headers)?;

    match state.resolver.resolve(&visit).await? {
        Resolution::RequiresPassword { code } => {
            debug!("Password wall for {}", code);
            Ok(Json(json!({ "requiresPassword": true, "shortCode": code })).into_response())
        }
        Resolution::Redirect { target } => {
            record_click(&state, &visit);
            redirect_response(&target, None)
        }
    }
}

/// Form body of a password submission.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    #[serde(default)]
    pub password: String,
}

/// Verifies a password for a protected link and redirects on success.
///
/// # Endpoint
///
/// `POST /{code}` with form field `password`
///
/// # Responses
///
/// - `302` plus a `Set-Cookie` binding an access token to this short code
/// - `401` with `{"success": false, "error": …, "requiresPassword": true}` on
///   a wrong password; no cookie is set
/// - `404` / `410` / `500` as for a GET visit
pub async fn password_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<PasswordForm>,
) -> Result<Response, AppError> {
    let visit = build_visit(code, &headers)?;
    let secure = is_secure_transport(&headers);

    let (resolution, cookie) = state
        .resolver
        .resolve_with_password(&visit, &form.password, secure)
        .await?;

    match resolution {
        Resolution::RequiresPassword { code } => {
            Ok(Json(json!({ "requiresPassword": true, "shortCode": code })).into_response())
        }
        Resolution::Redirect { target } => {
            record_click(&state, &visit);
            redirect_response(&target, cookie.as_deref())
        }
    }
}

/// Builds the typed visit descriptor from request parts.
///
/// Path segments that can never be short codes (reserved identifiers,
/// non-alphanumeric noise like `favicon.ico`) are rejected here, before any
/// store round-trip.
fn build_visit(code: String, headers: &HeaderMap) -> Result<Visit, AppError> {
    if !validate_short_code(&code) {
        return Err(AppError::not_found("Short link not found", json!({})));
    }

    let host = extract_host_from_headers(headers)?;

    let header_str =
        |name: header::HeaderName| headers.get(name).and_then(|v| v.to_str().ok()).map(String::from);

    Ok(Visit {
        code,
        host,
        user_agent: header_str(header::USER_AGENT),
        cookie_header: header_str(header::COOKIE),
        country: headers
            .get("cf-ipcountry")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    })
}

/// Emits a 302 with caching disabled at every layer.
///
/// Rewritten targets are frequently non-HTTP URIs (`youtube://`,
/// `intent://…`); an intermediary caching the redirect would pin one client's
/// rewrite for everyone.
fn redirect_response(target: &str, cookie: Option<&str>) -> Result<Response, AppError> {
    let mut builder = axum::http::Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, target)
        .header(
            header::CACHE_CONTROL,
            "no-store, no-cache, must-revalidate, proxy-revalidate",
        )
        .header(header::PRAGMA, "no-cache")
        .header(header::EXPIRES, "0");

    if let Some(cookie) = cookie {
        builder = builder.header(header::SET_COOKIE, cookie);
    }

    builder
        .body(axum::body::Body::empty())
        .map_err(|e| AppError::internal("Failed to build redirect", json!({ "reason": e.to_string() })))
}

/// Sends the click event without awaiting the recorder.
fn record_click(state: &AppState, visit: &Visit) {
    let event = ClickEvent::new(
        visit.code.clone(),
        visit.user_agent.as_deref(),
        visit.country.as_deref(),
    );
    if state.click_tx.try_send(event).is_err() {
        debug!("Click queue full, dropping click for {}", visit.code);
    }
}

/// True when the request reached us over TLS, directly or via a proxy.
fn is_secure_transport(headers: &HeaderMap) -> bool {
    headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|proto| proto.eq_ignore_ascii_case("https"))
}
