//! Stylesheet and placeholder image, compiled into the binary.

use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::response::IntoResponse;

const STATIC_CACHE: &str = "public, max-age=86400";

pub async fn stylesheet() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/css; charset=utf-8"), (CACHE_CONTROL, STATIC_CACHE)],
        include_str!("../../../../static/app.css"),
    )
}

pub async fn placeholder_image() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "image/svg+xml"), (CACHE_CONTROL, STATIC_CACHE)],
        include_str!("../../../../static/dummy-poster.svg"),
    )
}
