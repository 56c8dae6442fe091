//! Shared request helper.
//!
//! Requests carry the access token held by the [`AuthStore`]. A 401 answer
//! triggers one token refresh guarded by an async mutex: callers that hit a
//! 401 while a refresh is running wait for it and reuse the token it stored.
//! The request is retried once with the new token.

use std::sync::Arc;
use std::time::Duration;

use axum_extra::extract::cookie::Cookie;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};
use validator::Validate;

use crate::application::session::AuthStore;
use crate::domain::RefreshResponse;
use crate::shared::ApiError;

pub const FALLBACK_BACKEND_URL: &str = "http://localhost:8080";

/// Cookie carrying the backend refresh token.
pub const REFRESH_COOKIE: &str = "refreshToken";

const API_PREFIX: &str = "/api/v1";
const REFRESH_PATH: &str = "/auth/refresh";

/// Paths whose 401 means "bad credentials" rather than "expired token".
const NO_REFRESH_PATHS: &[&str] = &["/auth/login", "/auth/register", REFRESH_PATH];

/// `<configured url without trailing slashes>/api/v1`. Empty or
/// `"undefined"` falls back to the local backend.
pub fn resolve_base_url(configured: &str) -> String {
    let trimmed = configured.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        error!(fallback = FALLBACK_BACKEND_URL, "backend URL not configured");
        return format!("{FALLBACK_BACKEND_URL}{API_PREFIX}");
    }
    format!("{}{}", trimmed.trim_end_matches('/'), API_PREFIX)
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Schema(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<AuthStore>,
    refresh_lock: Mutex<()>,
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        store: Arc<AuthStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http_client(http, base_url, store))
    }

    /// Reuse an existing connection pool.
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &str,
        store: Arc<AuthStore>,
    ) -> Self {
        Self {
            http,
            base_url: resolve_base_url(base_url),
            store,
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn store(&self) -> &Arc<AuthStore> {
        &self.store
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a request and decode a JSON body.
    pub async fn request<T, B, Q>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let response = self.execute(method, path, query, body).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.request::<T, (), Q>(Method::GET, path, query, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request::<T, B, ()>(Method::POST, path, None, Some(body)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request::<T, B, ()>(Method::PUT, path, None, Some(body)).await
    }

    /// Send a request whose response body is ignored.
    pub async fn request_empty<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.execute::<B, ()>(method, path, None, body).await?;
        Ok(())
    }

    async fn execute<B, Q>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let token = self.store.access_token().await;
        let mut response = self
            .build(method.clone(), path, query, body, token.as_deref())
            .send()
            .await?;
        debug!(%method, path, status = response.status().as_u16(), "backend call");

        if response.status() == StatusCode::UNAUTHORIZED && !NO_REFRESH_PATHS.contains(&path) {
            let fresh = self.refresh_after_unauthorized(token.as_deref()).await?;
            response = self
                .build(method, path, query, body, Some(&fresh))
                .send()
                .await?;
            if response.status() == StatusCode::UNAUTHORIZED {
                warn!(path, "still unauthorized after refresh");
                self.store.logout().await?;
                return Err(ApiError::Unauthorized);
            }
        }

        self.capture_refresh_cookie(response.headers()).await?;
        ensure_success(response).await
    }

    fn build<B, Q>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
        body: Option<&B>,
        token: Option<&str>,
    ) -> RequestBuilder
    where
        B: Serialize + ?Sized,
        Q: Serialize + ?Sized,
    {
        let mut request = self.http.request(method, self.url(path));
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
    }

    async fn refresh_after_unauthorized(&self, stale: Option<&str>) -> Result<String, ApiError> {
        let _guard = self.refresh_lock.lock().await;

        if let Some(current) = self.store.access_token().await {
            if Some(current.as_str()) != stale {
                debug!("reusing token from concurrent refresh");
                return Ok(current);
            }
        }

        match self.refresh_locked().await {
            Ok(refreshed) => {
                if let Some(user) = refreshed.user {
                    self.store.update_user(user).await?;
                }
                self.store.set_access_token(&refreshed.access_token).await?;
                Ok(refreshed.access_token)
            }
            Err(e) => {
                warn!(error = %e, "token refresh failed, signing out");
                self.store.logout().await?;
                Err(ApiError::Unauthorized)
            }
        }
    }

    /// `POST /auth/refresh` with the stored refresh cookie.
    pub(super) async fn refresh_tokens(&self) -> Result<RefreshResponse, ApiError> {
        let _guard = self.refresh_lock.lock().await;
        self.refresh_locked().await
    }

    async fn refresh_locked(&self) -> Result<RefreshResponse, ApiError> {
        let mut request = self.http.post(self.url(REFRESH_PATH));
        if let Some(refresh) = self.store.refresh_token().await? {
            request = request.header(COOKIE, format!("{REFRESH_COOKIE}={refresh}"));
        }

        let response = request.send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        self.capture_refresh_cookie(response.headers()).await?;
        let refreshed: RefreshResponse = ensure_success(response).await?.json().await?;
        validated(refreshed)
    }

    /// Keep the refresh token the backend rotates through `Set-Cookie`.
    async fn capture_refresh_cookie(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        for value in headers.get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let Ok(cookie) = Cookie::parse(raw) else { continue };
            if cookie.name() != REFRESH_COOKIE {
                continue;
            }
            let expired = cookie.max_age().is_some_and(|age| age.is_zero());
            let token = if expired { "" } else { cookie.value() };
            self.store.set_refresh_token(token).await?;
            debug!(cleared = token.is_empty(), "refresh cookie captured");
        }
        Ok(())
    }
}

/// Reject a decoded response that breaks its own invariants.
pub(super) fn validated<T: Validate>(value: T) -> Result<T, ApiError> {
    value
        .validate()
        .map_err(|e| ApiError::Schema(e.to_string()))?;
    Ok(value)
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or(body);
    Err(ApiError::Status {
        status: status.as_u16(),
        message,
    })
}
