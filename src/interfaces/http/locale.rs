//! Locale of a localized page request.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};

use super::render::{not_found, Page};
use super::state::AppState;
use crate::domain::{split_locale, AuthSession, Locale};

/// First path segment as a supported locale. Any other first segment is a
/// 404 page rendered in the default locale.
#[derive(Debug, Clone)]
pub struct PageLocale {
    pub locale: Locale,
    /// Full request path, locale included.
    pub path: String,
    pub query: Option<String>,
}

impl PageLocale {
    /// Path without the locale prefix.
    pub fn bare_path(&self) -> &str {
        split_locale(&self.path).1
    }
}

impl FromRequestParts<AppState> for PageLocale {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        match split_locale(&path) {
            (Some(locale), _) => Ok(Self {
                locale,
                query: parts.uri.query().map(str::to_string),
                path,
            }),
            (None, _) => {
                let fallback = PageLocale {
                    locale: state.default_locale,
                    path: "/".to_string(),
                    query: None,
                };
                Err(not_found(&Page::new(state, &fallback, AuthSession::anonymous())).into_response())
            }
        }
    }
}
