//! Backend ports implemented by the HTTP API client.
//!
//! Services depend on these traits so tests can swap in fakes.

use async_trait::async_trait;

use crate::application::dto::{
    ChangePasswordRequest, CreateUniversityAdminRequest, CreateUniversityRequest, ListQuery,
    LoginRequest, RegisterRequest, UpdateProfileRequest, UpdateUniversityRequest,
};
use crate::domain::{
    AuthResponse, RefreshResponse, University, UniversityAdmin, UniversityDetail, User,
};
use crate::shared::{ApiError, Paginated};

pub type ApiResult<T> = Result<T, ApiError>;

#[async_trait]
pub trait IdentityBackend: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;
    /// Exchange the stored refresh token for a new access token.
    async fn refresh(&self) -> ApiResult<RefreshResponse>;
    async fn logout(&self) -> ApiResult<()>;
    async fn me(&self) -> ApiResult<User>;
    async fn update_profile(&self, request: &UpdateProfileRequest) -> ApiResult<User>;
    async fn change_password(&self, request: &ChangePasswordRequest) -> ApiResult<()>;
}

#[async_trait]
pub trait UniversityBackend: Send + Sync {
    async fn list_universities(&self, query: &ListQuery) -> ApiResult<Paginated<University>>;
    async fn get_university(&self, id: i64) -> ApiResult<University>;
    async fn get_university_detail(&self, id: i64) -> ApiResult<UniversityDetail>;
    async fn create_university(&self, request: &CreateUniversityRequest) -> ApiResult<University>;
    async fn update_university(
        &self,
        id: i64,
        request: &UpdateUniversityRequest,
    ) -> ApiResult<UniversityDetail>;
    async fn list_university_admins(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<UniversityAdmin>>;
    /// The backend answers with a plain-text confirmation, not the record.
    async fn create_university_admin(&self, request: &CreateUniversityAdminRequest)
        -> ApiResult<()>;
}
