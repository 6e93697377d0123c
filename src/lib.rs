//! Recency Cache - a fixed-capacity LRU key-value cache server
//!
//! Provides O(1) `get`/`put` with exact least-recently-used eviction, shared
//! safely across concurrent HTTP request handlers.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{LruCache, SharedCache};
pub use config::Config;
pub use error::CacheError;
