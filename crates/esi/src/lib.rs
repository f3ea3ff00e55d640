//! ESI (EVE Swagger Interface) client with disk-cache-first reads.
//!
//! Character and corporation documents are cached as JSON under their
//! entity id; portraits and logos as PNG blobs. A cache hit never touches
//! the network. There is no retry or backoff: one request, 10 s timeout,
//! and the error is the caller's to handle.

mod client;
mod types;

pub use client::{ESI_BASE, EsiClient, IMAGE_BASE};
pub use types::{Character, Corporation};

/// Errors from ESI requests.
#[derive(Debug, thiserror::Error)]
pub enum EsiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0} for {1}")]
    Status(u16, String),

    #[error("cache error: {0}")]
    Cache(#[from] evecfg_cache::CacheError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
