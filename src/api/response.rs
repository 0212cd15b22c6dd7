//! Cached JSON Responses
//!
//! Emits response content together with its validation tag and a marker
//! telling whether it came from the cache or was freshly computed.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::{info, warn};

use crate::cache::{CachedContent, ResponseCache};

/// Header carrying the cache-sourced flag (`HIT` or `MISS`)
pub const X_CACHE: &str = "x-cache";

// == Json Response ==
/// JSON response body plus the metadata the cache stores with it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub content: Value,
    /// ETag value, omitted from the response when empty
    pub validation_tag: String,
    /// Whether the content was served from the cache
    pub from_cache: bool,
    /// Whether the client's `If-None-Match` already matches the tag
    pub not_modified: bool,
}

impl JsonResponse {
    /// A freshly computed response.
    pub fn fresh(content: Value, validation_tag: impl Into<String>) -> Self {
        Self {
            content,
            validation_tag: validation_tag.into(),
            from_cache: false,
            not_modified: false,
        }
    }

    /// A response rebuilt from a cache hit.
    pub fn cached(hit: CachedContent) -> Self {
        Self {
            content: hit.content,
            validation_tag: hit.validation_tag,
            from_cache: true,
            not_modified: false,
        }
    }

    /// Downgrades the response to `304 Not Modified` when `if_none_match`
    /// matches its validation tag.
    pub fn conditional(mut self, if_none_match: Option<&str>) -> Self {
        self.not_modified = if_none_match
            .map(|candidates| tag_matches(candidates, &self.validation_tag))
            .unwrap_or(false);
        self
    }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        let source = if self.from_cache { "HIT" } else { "MISS" };

        let mut response = if self.not_modified {
            StatusCode::NOT_MODIFIED.into_response()
        } else {
            Json(self.content).into_response()
        };

        let headers = response.headers_mut();
        headers.insert(X_CACHE, HeaderValue::from_static(source));
        if !self.validation_tag.is_empty() {
            match HeaderValue::from_str(&self.validation_tag) {
                Ok(etag) => {
                    headers.insert(header::ETAG, etag);
                }
                Err(_) => warn!(
                    tag = %self.validation_tag,
                    "Validation tag is not a valid header value"
                ),
            }
        }

        response
    }
}

// == Cache Entry Point ==
impl ResponseCache {
    /// Serves `url` from the cache if a fresh entry exists.
    ///
    /// On a hit the entry's expiry slides forward and the returned response
    /// is marked as cache-sourced. On a miss the caller computes the
    /// response and stores it with [`ResponseCache::put`].
    pub async fn respond(&self, url: &str, if_none_match: Option<&str>) -> Option<JsonResponse> {
        let hit = self.get(url).await?;
        info!(url, "Response sent from cache");
        Some(JsonResponse::cached(hit).conditional(if_none_match))
    }
}

// == Helpers ==
/// Cache key for a request: its path.
///
/// The item handlers never read the query string, so every query variant of
/// a path shares one entry and a write to that path invalidates all of them.
pub fn cache_key(uri: &Uri) -> String {
    uri.path().to_string()
}

/// Raw `If-None-Match` header, if present and readable.
pub fn if_none_match(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::IF_NONE_MATCH)
        .and_then(|value| value.to_str().ok())
}

/// Strong ETag derived from the serialized content.
///
/// `DefaultHasher` output is only stable within one build of the binary, so
/// tags do not survive a rebuild. The cache does not outlive the process, so
/// nothing depends on them being stable longer than that.
pub fn fingerprint(content: &Value) -> String {
    let mut hasher = DefaultHasher::new();
    content.to_string().hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// Weak comparison of an `If-None-Match` list against `tag`.
fn tag_matches(if_none_match: &str, tag: &str) -> bool {
    if tag.is_empty() {
        return false;
    }
    let tag = strip_weak(tag);
    if_none_match
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == "*" || strip_weak(candidate) == tag)
}

fn strip_weak(tag: &str) -> &str {
    tag.strip_prefix("W/").unwrap_or(tag)
}
