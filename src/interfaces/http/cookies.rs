//! Cookies written by the web tier.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::domain::{Locale, COMPARE_COOKIE};
use crate::infrastructure::api_client::REFRESH_COOKIE;

/// Remembers the last locale a visitor used.
pub const LOCALE_COOKIE: &str = "locale";

const SESSION_DAYS: i64 = 7;

/// Cookie values are URI-component encoded, as browser cookie libraries do.
fn encode_value(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Readable cookie mirroring the auth store for the gate.
pub fn auth_mirror_cookie(name: &str, mirror: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((name.to_string(), encode_value(mirror)))
        .http_only(false)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_DAYS))
        .build()
}

pub fn refresh_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((REFRESH_COOKIE, token.to_string()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .path("/")
        .max_age(Duration::days(SESSION_DAYS))
        .build()
}

pub fn compare_cookie(value: &str) -> Cookie<'static> {
    Cookie::build((COMPARE_COOKIE, encode_value(value)))
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(30))
        .build()
}

pub fn locale_cookie(locale: Locale) -> Cookie<'static> {
    Cookie::build((LOCALE_COOKIE, locale.code()))
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(365))
        .build()
}

/// Removal cookie for `name`.
pub fn clear_cookie(name: &str) -> Cookie<'static> {
    Cookie::build((name.to_string(), ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}
