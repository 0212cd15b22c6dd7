//! API Handlers
//!
//! HTTP request handlers for each server endpoint. Item reads go through
//! the response cache; item writes invalidate the URLs they affect.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    Json,
};
use serde_json::Value;
use tracing::debug;

use crate::api::response::{cache_key, fingerprint, if_none_match, JsonResponse};
use crate::cache::ResponseCache;
use crate::error::{ApiError, Result};
use crate::models::{DeleteResponse, HealthResponse, Item, ItemRequest, StatsResponse};
use crate::repository::ItemRepository;

/// Collection URL, also the cache key for the item list
pub const ITEMS_PATH: &str = "/api/items";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared response cache
    pub cache: Arc<ResponseCache>,
    /// Content source for the item endpoints
    pub items: Arc<ItemRepository>,
}

impl AppState {
    /// Creates a new AppState around the given cache and an empty repository.
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache: Arc::new(cache),
            items: Arc::new(ItemRepository::new()),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Starts the cache's sweep task, so it must run inside a Tokio runtime.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(ResponseCache::new(config.cache_ttl()))
    }
}

fn item_url(id: u64) -> String {
    format!("{}/{}", ITEMS_PATH, id)
}

/// Caches freshly computed content under `url` and builds its response.
async fn store_fresh(
    cache: &ResponseCache,
    url: String,
    content: Value,
    if_none_match: Option<&str>,
) -> JsonResponse {
    let tag = fingerprint(&content);
    cache.put(url.clone(), content.clone(), tag.clone()).await;
    debug!(url = %url, "Response computed");
    JsonResponse::fresh(content, tag).conditional(if_none_match)
}

/// Drops cached responses that include item `id`.
async fn invalidate_item(cache: &ResponseCache, id: u64) {
    cache.invalidate(ITEMS_PATH).await;
    cache.invalidate(&item_url(id)).await;
}

/// Handler for GET /api/items
pub async fn list_items_handler(
    State(state): State<AppState>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<JsonResponse> {
    let url = cache_key(&uri);
    let if_none_match = if_none_match(&headers);

    if let Some(cached) = state.cache.respond(&url, if_none_match).await {
        return Ok(cached);
    }

    let content = serde_json::to_value(state.items.list().await)?;
    Ok(store_fresh(&state.cache, url, content, if_none_match).await)
}

/// Handler for GET /api/items/:id
///
/// Missing items are reported as 404 and never cached.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    uri: Uri,
    headers: HeaderMap,
) -> Result<JsonResponse> {
    let url = cache_key(&uri);
    let if_none_match = if_none_match(&headers);

    if let Some(cached) = state.cache.respond(&url, if_none_match).await {
        return Ok(cached);
    }

    let item = state
        .items
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("item {}", id)))?;
    let content = serde_json::to_value(item)?;
    Ok(store_fresh(&state.cache, url, content, if_none_match).await)
}

/// Handler for POST /api/items
pub async fn create_item_handler(
    State(state): State<AppState>,
    Json(req): Json<ItemRequest>,
) -> Result<(StatusCode, Json<Item>)> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let item = state.items.create(req).await;
    state.cache.invalidate(ITEMS_PATH).await;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Handler for PUT /api/items/:id
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<Item>> {
    if let Some(error_msg) = req.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let item = state
        .items
        .update(id, req)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("item {}", id)))?;
    invalidate_item(&state.cache, id).await;

    Ok(Json(item))
}

/// Handler for DELETE /api/items/:id
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<DeleteResponse>> {
    if !state.items.delete(id).await {
        return Err(ApiError::NotFound(format!("item {}", id)));
    }
    invalidate_item(&state.cache, id).await;

    Ok(Json(DeleteResponse::new(id)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.stats().await;
    let ttl = state.cache.ttl().await;

    Json(StatsResponse::new(&stats, ttl.as_secs()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
