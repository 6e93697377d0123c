//! Request DTOs for the cache server API
//!
//! Defines the query parameters accepted by the store and fetch endpoints.

use serde::Deserialize;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Query parameters for the store operation (POST /store)
#[derive(Debug, Clone, Deserialize)]
pub struct StoreRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
}

impl StoreRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key).or_else(|| {
            (self.value.len() > MAX_VALUE_SIZE).then(|| {
                format!("Value exceeds maximum size of {} bytes", MAX_VALUE_SIZE)
            })
        })
    }
}

/// Query parameters for the fetch operation (GET /fetch)
#[derive(Debug, Clone, Deserialize)]
pub struct FetchRequest {
    /// The cache key
    pub key: String,
}

impl FetchRequest {
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }
}

fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
