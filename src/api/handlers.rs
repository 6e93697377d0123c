//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use crate::cache::SharedCache;
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    FetchRequest, FetchResponse, HealthResponse, StatsResponse, StoreRequest, StoreResponse,
};

/// Application state shared across all handlers.
///
/// Holds the one cache instance created at startup; handlers receive it by
/// injection through axum's `State` extractor. Values are `Arc<str>` so a
/// fetch only bumps a refcount while the cache lock is held.
#[derive(Clone)]
pub struct AppState {
    pub cache: SharedCache<String, Arc<str>>,
}

impl AppState {
    pub fn new(cache: SharedCache<String, Arc<str>>) -> Self {
        Self { cache }
    }

    /// Creates the cache from configuration.
    ///
    /// # Errors
    /// Fails with [`CacheError::InvalidCapacity`] if the configured capacity
    /// is zero.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(SharedCache::new(config.capacity)?))
    }
}

/// Handler for POST /store?key=..&value=..
pub async fn store_handler(
    State(state): State<AppState>,
    Query(req): Query<StoreRequest>,
) -> Result<Json<StoreResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    debug!(key = %req.key, value_len = req.value.len(), "store");
    state.cache.put(req.key.clone(), Arc::from(req.value)).await;

    Ok(Json(StoreResponse::new(req.key)))
}

/// Handler for GET /fetch?key=..
///
/// A miss becomes a 404; the cache itself treats it as a normal outcome.
pub async fn fetch_handler(
    State(state): State<AppState>,
    Query(req): Query<FetchRequest>,
) -> Result<Json<FetchResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match state.cache.get(req.key.as_str()).await {
        Some(value) => {
            debug!(key = %req.key, "fetch hit");
            Ok(Json(FetchResponse::new(req.key, &*value)))
        }
        None => {
            debug!(key = %req.key, "fetch miss");
            Err(CacheError::NotFound(req.key))
        }
    }
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.cache.stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
