//! University listings, details, comparison and administrator management.

pub mod forms;

use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{info, warn};

use crate::application::identity::{CreateUniversityAdminForm, FormSchema};
use crate::application::ports::UniversityBackend;
use crate::application::table::DataTableParams;
use crate::domain::{CompareList, University, UniversityAdmin, UniversityDetail};
use crate::shared::{ApiError, AppError, Paginated};

pub use forms::{CreateUniversityForm, TranslationFields, UniversityEditForm, NAME_REQUIRED};

pub struct CatalogService<B: UniversityBackend> {
    backend: Arc<B>,
}

impl<B: UniversityBackend> CatalogService<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn universities(
        &self,
        params: &DataTableParams,
    ) -> Result<Paginated<University>, AppError> {
        Ok(self
            .backend
            .list_universities(&params.to_list_query())
            .await?)
    }

    pub async fn university(&self, id: i64) -> Result<University, AppError> {
        Ok(self.backend.get_university(id).await?)
    }

    /// Everything the admin edit page shows, progress included.
    pub async fn detail(&self, id: i64) -> Result<UniversityDetail, AppError> {
        Ok(self.backend.get_university_detail(id).await?)
    }

    pub async fn update(
        &self,
        id: i64,
        form: UniversityEditForm,
    ) -> Result<UniversityDetail, AppError> {
        let form = form.check()?;
        let detail = self.backend.update_university(id, &form.into()).await?;
        info!(
            university_id = id,
            progress = detail.progress.total_percent,
            "university updated"
        );
        Ok(detail)
    }

    pub async fn create(&self, form: CreateUniversityForm) -> Result<University, AppError> {
        let form = form.check()?;
        let university = self.backend.create_university(&form.into()).await?;
        info!(university_id = university.id, slug = ?university.slug, "university created");
        Ok(university)
    }

    /// Universities of the compare list in list order. Ids the backend no
    /// longer knows are skipped.
    pub async fn compared(&self, list: &CompareList) -> Result<Vec<University>, AppError> {
        let fetched = join_all(list.ids().iter().map(|id| self.backend.get_university(*id))).await;

        let mut universities = Vec::with_capacity(fetched.len());
        for (id, result) in list.ids().iter().zip(fetched) {
            match result {
                Ok(university) => universities.push(university),
                Err(ApiError::Status { status: 404, .. }) => {
                    warn!(university_id = id, "compared university no longer exists");
                }
                Err(e) => return Err(e.into()),
            }
        }
        Ok(universities)
    }

    pub async fn admins(
        &self,
        params: &DataTableParams,
    ) -> Result<Paginated<UniversityAdmin>, AppError> {
        Ok(self
            .backend
            .list_university_admins(&params.to_list_query())
            .await?)
    }

    pub async fn create_admin(&self, form: CreateUniversityAdminForm) -> Result<(), AppError> {
        let form = form.check()?;
        let (email, university_id) = (form.email.clone(), form.university_id);
        self.backend.create_university_admin(&form.into()).await?;
        info!(%email, university_id, "university admin created");
        Ok(())
    }
}
