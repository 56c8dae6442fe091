use async_trait::async_trait;

use super::client::{validated, ApiClient};
use crate::application::dto::{
    ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest,
};
use crate::application::ports::{ApiResult, IdentityBackend};
use crate::domain::{AuthResponse, RefreshResponse, User};

#[async_trait]
impl IdentityBackend for ApiClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        validated(self.post("/auth/login", request).await?)
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        validated(self.post("/auth/register", request).await?)
    }

    async fn refresh(&self) -> ApiResult<RefreshResponse> {
        self.refresh_tokens().await
    }

    async fn logout(&self) -> ApiResult<()> {
        self.request_empty::<()>(reqwest::Method::POST, "/auth/logout", None)
            .await
    }

    async fn me(&self) -> ApiResult<User> {
        validated(self.get::<User, ()>("/auth/me", None).await?)
    }

    async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<User> {
        validated(self.put("/users/profile", request).await?)
    }

    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()> {
        self.request_empty(reqwest::Method::PUT, "/users/password", Some(request))
            .await
    }
}
