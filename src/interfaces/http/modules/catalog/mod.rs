//! Public university catalog: home, listing, details and comparison.

pub mod compare;
pub mod pages;
mod views;

use axum::http::header::{HeaderName, CACHE_CONTROL};

/// `Cache-Control` for cacheable list pages.
pub(crate) fn list_cache_header(ttl_secs: u64) -> [(HeaderName, String); 1] {
    [(CACHE_CONTROL, format!("public, max-age={ttl_secs}"))]
}
