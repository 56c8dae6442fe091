use async_trait::async_trait;
use reqwest::Method;

use super::client::ApiClient;
use crate::application::dto::{
    CreateUniversityAdminRequest, CreateUniversityRequest, ListQuery, UpdateUniversityRequest,
};
use crate::application::ports::{ApiResult, UniversityBackend};
use crate::domain::{University, UniversityAdmin, UniversityDetail};
use crate::shared::Paginated;

#[async_trait]
impl UniversityBackend for ApiClient {
    async fn list_universities(&self, query: &ListQuery) -> ApiResult<Paginated<University>> {
        self.get("/universities", Some(query)).await
    }

    async fn get_university(&self, id: i64) -> ApiResult<University> {
        self.get::<University, ()>(&format!("/universities/{id}"), None)
            .await
    }

    async fn get_university_detail(&self, id: i64) -> ApiResult<UniversityDetail> {
        self.get::<UniversityDetail, ()>(&format!("/universities/{id}/detail"), None)
            .await
    }

    async fn create_university(&self, request: &CreateUniversityRequest) -> ApiResult<University> {
        self.post("/universities", request).await
    }

    async fn update_university(
        &self,
        id: i64,
        request: &UpdateUniversityRequest,
    ) -> ApiResult<UniversityDetail> {
        self.put(&format!("/universities/{id}"), request).await
    }

    async fn list_university_admins(
        &self,
        query: &ListQuery,
    ) -> ApiResult<Paginated<UniversityAdmin>> {
        self.get("/admin/university-admins", Some(query)).await
    }

    async fn create_university_admin(
        &self,
        request: &CreateUniversityAdminRequest,
    ) -> ApiResult<()> {
        self.request_empty(Method::POST, "/admin/university-admins", Some(request))
            .await
    }
}
