//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::error::{CacheError, Result};

/// Default cache capacity, matching the reference service.
pub const DEFAULT_CAPACITY: usize = 3;

/// Default HTTP port.
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub capacity: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 3)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    ///
    /// Unset variables fall back to their defaults. A variable that is set
    /// but cannot be parsed is a startup error rather than a silent default.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            capacity: read_var("CACHE_CAPACITY", DEFAULT_CAPACITY)?,
            server_port: read_var("SERVER_PORT", DEFAULT_SERVER_PORT)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            server_port: DEFAULT_SERVER_PORT,
        }
    }
}

fn read_var<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CacheError::InvalidConfig(format!(
                "{} must be a non-negative integer, got '{}'",
                name, raw
            ))
        }),
        Err(_) => Ok(default),
    }
}
