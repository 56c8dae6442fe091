//! Request middleware: the auth gate and locale memory.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::debug;

use super::cookies::{locale_cookie, LOCALE_COOKIE};
use super::state::AppState;
use crate::application::{decide, GateDecision};
use crate::domain::split_locale;

/// Redirects anonymous visitors away from protected pages and signed-in
/// visitors away from login pages. Only the readable auth cookie is
/// consulted; no backend call is made.
pub async fn gate_middleware(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let cookie = jar.get(state.site.auth_cookie_name()).map(|c| c.value());
    let path = request.uri().path();

    match decide(state.site, state.default_locale, path, cookie) {
        GateDecision::Pass => next.run(request).await,
        GateDecision::Redirect(location) => {
            debug!(path, %location, "gate redirect");
            Redirect::temporary(&location).into_response()
        }
    }
}

/// Remember the locale of successfully served localized pages.
pub async fn locale_cookie_middleware(request: Request<Body>, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let (locale, _) = split_locale(request.uri().path());
    let response = next.run(request).await;

    match locale {
        Some(locale)
            if response.status().is_success()
                && jar.get(LOCALE_COOKIE).map(|c| c.value()) != Some(locale.code()) =>
        {
            (CookieJar::new().add(locale_cookie(locale)), response).into_response()
        }
        _ => response,
    }
}
