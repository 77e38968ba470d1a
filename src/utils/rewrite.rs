//! Destination rewriting for in-app browser escapes and native deep links.
//!
//! In-app webviews (Instagram, TikTok, mail clients) trap outbound links.
//! Rewriting the destination nudges the platform into the system browser or
//! directly into the native app that owns the content. Rewriting is a
//! best-effort enhancement: every failure path returns the destination
//! unchanged so the redirect itself is never at risk.
//!
//! Escape prefixes follow the technique catalogued by the inapp-debugger
//! project (https://github.com/shalanah/inapp-debugger).

use url::Url;

use crate::utils::client::ClientOs;

/// Prefix that forces iOS to hand the URL to Safari instead of a webview.
const SAFARI_ESCAPE_PREFIX: &str = "x-safari-";

/// Android intent-URI scheme replacing `http(s)://`.
const ANDROID_INTENT_PREFIX: &str = "intent://";

/// Hosts served by the YouTube app.
const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "m.youtube.com", "youtu.be"];

/// Host served by the Spotify app.
const SPOTIFY_HOST: &str = "open.spotify.com";

/// Spotify path entity types that map onto `spotify:<type>:<id>` URIs.
const SPOTIFY_ENTITY_TYPES: &[&str] = &["album", "artist", "episode", "playlist", "show", "track"];

/// Rewrites a validated destination for the classified client.
///
/// First matching rule wins:
///
/// 1. iOS + YouTube host: `youtube://` deep link keeping host, path, query
///    and fragment.
/// 2. iOS + Spotify host with a `/<type>/<id>` path: `spotify:type:id`.
/// 3. iOS: `x-safari-` prefixed URL opening the system browser.
/// 4. Android: intent URI declaring the original scheme.
/// 5. Anything else: the destination unchanged.
pub fn rewrite_destination(destination: &Url, os: ClientOs) -> String {
    match os {
        ClientOs::Ios => rewrite_ios(destination),
        ClientOs::Android => rewrite_android(destination),
        ClientOs::Other => destination.to_string(),
    }
}

fn rewrite_ios(destination: &Url) -> String {
    if let Some(deep_link) = youtube_deep_link(destination) {
        return deep_link;
    }
    if let Some(deep_link) = spotify_deep_link(destination) {
        return deep_link;
    }
    format!("{}{}", SAFARI_ESCAPE_PREFIX, destination)
}

fn rewrite_android(destination: &Url) -> String {
    let Some(stripped) = strip_http_scheme(destination) else {
        return destination.to_string();
    };
    format!(
        "{}{}#Intent;scheme={};end",
        ANDROID_INTENT_PREFIX,
        stripped,
        destination.scheme()
    )
}

fn youtube_deep_link(destination: &Url) -> Option<String> {
    let host = destination.host_str()?.to_ascii_lowercase();
    if !YOUTUBE_HOSTS.contains(&host.as_str()) {
        return None;
    }
    let stripped = strip_http_scheme(destination)?;
    Some(format!("youtube://{}", stripped))
}

fn spotify_deep_link(destination: &Url) -> Option<String> {
    let host = destination.host_str()?.to_ascii_lowercase();
    if host != SPOTIFY_HOST {
        return None;
    }

    let mut segments = destination.path().trim_matches('/').split('/');
    let entity_type = segments.next()?;
    let entity_id = segments.next()?;
    if segments.next().is_some() || entity_id.is_empty() {
        return None;
    }
    if !SPOTIFY_ENTITY_TYPES.contains(&entity_type) {
        return None;
    }

    Some(format!("spotify:{}:{}", entity_type, entity_id))
}

/// Drops the `http://` / `https://` prefix, keeping everything after it.
fn strip_http_scheme(destination: &Url) -> Option<&str> {
    let raw = destination.as_str();
    raw.strip_prefix("https://")
        .or_else(|| raw.strip_prefix("http://"))
}
