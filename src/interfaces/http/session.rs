//! Per-request session.
//!
//! The browser's auth cookies seed an in-memory [`AuthStore`]; services run
//! against it and [`RequestSession::sync`] writes back whatever changed.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;

use super::cookies::{auth_mirror_cookie, clear_cookie, refresh_cookie};
use super::state::AppState;
use crate::application::{AuthStore, CatalogService, IdentityService};
use crate::domain::AuthSession;
use crate::infrastructure::api_client::REFRESH_COOKIE;
use crate::infrastructure::{ApiClient, InMemoryStorage};
use crate::shared::AppError;

pub struct RequestSession {
    store: Arc<AuthStore>,
    client: Arc<ApiClient>,
    cookie_name: &'static str,
    secure: bool,
    initial_mirror: String,
    initial_refresh: Option<String>,
}

impl RequestSession {
    pub async fn from_cookies(state: &AppState, jar: &CookieJar) -> Result<Self, AppError> {
        let cookie_name = state.site.auth_cookie_name();
        let storage = match jar.get(cookie_name) {
            Some(cookie) => InMemoryStorage::with_entry(cookie_name, cookie.value()),
            None => InMemoryStorage::new(),
        };
        let store = Arc::new(AuthStore::new(Arc::new(storage), cookie_name));
        if let Some(cookie) = jar.get(REFRESH_COOKIE) {
            store.set_refresh_token(cookie.value()).await?;
        }
        store.hydrate().await?;

        let client = Arc::new(ApiClient::with_http_client(
            state.http.clone(),
            &state.backend_url,
            store.clone(),
        ));

        Ok(Self {
            initial_mirror: store.mirror_value().await?,
            initial_refresh: store.refresh_token().await?,
            store,
            client,
            cookie_name,
            secure: state.secure_cookies,
        })
    }

    pub fn identity(&self) -> IdentityService<ApiClient> {
        IdentityService::new(self.client.clone(), self.store.clone())
    }

    pub fn catalog(&self) -> CatalogService<ApiClient> {
        CatalogService::new(self.client.clone())
    }

    pub async fn snapshot(&self) -> AuthSession {
        self.store.snapshot().await
    }

    /// Add cookies for whatever the request changed in the store.
    pub async fn sync(&self, jar: CookieJar) -> Result<CookieJar, AppError> {
        let mut jar = jar;

        let mirror = self.store.mirror_value().await?;
        if mirror != self.initial_mirror {
            jar = if self.store.is_authenticated().await {
                jar.add(auth_mirror_cookie(self.cookie_name, &mirror, self.secure))
            } else {
                jar.add(clear_cookie(self.cookie_name))
            };
        }

        let refresh = self.store.refresh_token().await?;
        if refresh != self.initial_refresh {
            jar = match refresh {
                Some(token) => jar.add(refresh_cookie(&token, self.secure)),
                None => jar.add(clear_cookie(REFRESH_COOKIE)),
            };
        }
        Ok(jar)
    }

    /// Attach session cookies to a finished response.
    pub async fn finish(&self, jar: CookieJar, response: Response) -> Response {
        match self.sync(jar).await {
            Ok(jar) => (jar, response).into_response(),
            Err(e) => e.into_response(),
        }
    }

    /// JSON counterpart of [`finish`](Self::finish). Cookies are written for
    /// failures too, so a refresh that signed the user out clears them.
    pub async fn respond<T: IntoResponse>(&self, jar: CookieJar, result: Result<T, AppError>) -> Response {
        let response = match result {
            Ok(body) => body.into_response(),
            Err(e) => e.into_response(),
        };
        self.finish(jar, response).await
    }
}

impl FromRequestParts<AppState> for RequestSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Self::from_cookies(state, &jar).await
    }
}
