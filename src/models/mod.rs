//! Request and Response models for the cache server API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request parameters and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{FetchRequest, StoreRequest, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
pub use responses::{FetchResponse, HealthResponse, StatsResponse, StoreResponse};
