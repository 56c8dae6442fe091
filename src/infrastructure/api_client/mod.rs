//! HTTP client for the platform backend (`<base>/api/v1`).

pub mod client;
mod identity;
mod universities;

pub use client::{resolve_base_url, ApiClient, FALLBACK_BACKEND_URL, REFRESH_COOKIE};
