//! Admin pages.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use tracing::{info, warn};

use super::views::{self, CreateView, EditView, UsersView, UNIVERSITY_ADMIN_ROLE};
use crate::application::{
    CreateUniversityAdminForm, CreateUniversityForm, DataTableParams, UniversityEditForm,
};
use crate::domain::{localized_path, AuthSession, Locale, UniversityAdmin};
use crate::interfaces::http::locale::PageLocale;
use crate::interfaces::http::modules::catalog::list_cache_header;
use crate::interfaces::http::render::{failure, form_failure, not_found, Page};
use crate::interfaces::http::session::RequestSession;
use crate::interfaces::http::state::AppState;
use crate::shared::{ApiError, AppError, FieldErrors, Paginated};

fn table_params(at: &PageLocale) -> DataTableParams {
    DataTableParams::from_query(at.query.as_deref().unwrap_or(""))
}

/// University the signed-in user administers, when the role limits them
/// to a single one.
fn own_university(session: &AuthSession) -> Option<Option<i64>> {
    session
        .user
        .as_ref()
        .filter(|u| u.role == UNIVERSITY_ADMIN_ROLE)
        .map(|u| u.university_id)
}

fn edit_path(locale: Locale, id: i64) -> String {
    localized_path(locale, &format!("/universities/{id}/edit"))
}

/// Universities table with search, status filter and paging. University
/// administrators go straight to their own university.
pub async fn dashboard(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    if let Some(Some(id)) = own_university(&session.snapshot().await) {
        let target = edit_path(at.locale, id);
        return session.finish(jar, Redirect::temporary(&target).into_response()).await;
    }
    let params = table_params(&at);
    let result = session.catalog().universities(&params).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match result {
        Ok(list) => (
            list_cache_header(state.cache_ttl_secs),
            views::dashboard(&page, &params, &list),
        )
            .into_response(),
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

/// The listing failing does not hide the create form; an expired session
/// still goes to the login page.
async fn load_admins(
    session: &RequestSession,
    params: &DataTableParams,
) -> Result<Option<Paginated<UniversityAdmin>>, AppError> {
    match session.catalog().admins(params).await {
        Ok(list) => Ok(Some(list)),
        Err(err @ AppError::Api(ApiError::Unauthorized)) => Err(err),
        Err(err) => {
            warn!(error = %err, "administrator list unavailable");
            Ok(None)
        }
    }
}

pub async fn users(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let params = table_params(&at);
    let admins = load_admins(&session, &params).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match admins {
        Ok(admins) => {
            let form = CreateUniversityAdminForm::default();
            let errors = FieldErrors::new();
            let view = UsersView {
                params: &params,
                admins: admins.as_ref(),
                form: &form,
                errors: &errors,
                notice: None,
            };
            views::users(&page, &view).into_response()
        }
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

pub async fn create_user(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Form(form): Form<CreateUniversityAdminForm>,
) -> Response {
    let params = table_params(&at);
    let submitted = form.clone();
    let created = session.catalog().create_admin(form).await;
    let admins = load_admins(&session, &params).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let admins = match admins {
        Ok(admins) => admins,
        Err(err) => return session.finish(jar, failure(&page, err)).await,
    };

    let response = match created {
        Ok(()) => {
            let form = CreateUniversityAdminForm::default();
            let errors = FieldErrors::new();
            let view = UsersView {
                params: &params,
                admins: admins.as_ref(),
                form: &form,
                errors: &errors,
                notice: Some(("success", page.text("Users.createdOk"))),
            };
            views::users(&page, &view).into_response()
        }
        Err(err) => form_failure(&page, err, |errors, message| {
            let view = UsersView {
                params: &params,
                admins: admins.as_ref(),
                form: &submitted,
                errors,
                notice: message.map(|m| ("error", m.to_string())),
            };
            views::users(&page, &view)
        }),
    };
    session.finish(jar, response).await
}

/// Where a university administrator is sent instead of another university's
/// page, if anywhere.
fn foreign_university_redirect(session: &AuthSession, locale: Locale, id: i64) -> Option<String> {
    match own_university(session)? {
        Some(own) if own == id => None,
        Some(own) => Some(edit_path(locale, own)),
        None => Some(localized_path(locale, "/")),
    }
}

pub async fn edit_university(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Path((_, id)): Path<(String, String)>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        let page = Page::new(&state, &at, session.snapshot().await);
        return not_found(&page);
    };
    if let Some(target) = foreign_university_redirect(&session.snapshot().await, at.locale, id) {
        info!(university_id = id, "university administrator sent to own university");
        return session.finish(jar, Redirect::temporary(&target).into_response()).await;
    }

    let result = session.catalog().detail(id).await;
    let page = Page::new(&state, &at, session.snapshot().await);
    let response = match result {
        Ok(detail) => {
            let form = UniversityEditForm::from_detail(&detail);
            let errors = FieldErrors::new();
            let view = EditView {
                detail: &detail,
                form: &form,
                errors: &errors,
                notice: None,
            };
            views::edit_university(&page, &view).into_response()
        }
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

pub async fn update_university(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Path((_, id)): Path<(String, String)>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let Ok(id) = id.parse::<i64>() else {
        let page = Page::new(&state, &at, session.snapshot().await);
        return not_found(&page);
    };
    if let Some(target) = foreign_university_redirect(&session.snapshot().await, at.locale, id) {
        return session.finish(jar, Redirect::to(&target).into_response()).await;
    }

    let submitted = UniversityEditForm::from_pairs(pairs);
    let updated = session.catalog().update(id, submitted.clone()).await;

    let response = match updated {
        Ok(detail) => {
            let page = Page::new(&state, &at, session.snapshot().await);
            let form = UniversityEditForm::from_detail(&detail);
            let errors = FieldErrors::new();
            let view = EditView {
                detail: &detail,
                form: &form,
                errors: &errors,
                notice: Some(("success", page.text("University.saved"))),
            };
            views::edit_university(&page, &view).into_response()
        }
        Err(err) => {
            // The page still needs the stored title and progress around the
            // rejected input.
            let detail = session.catalog().detail(id).await;
            let page = Page::new(&state, &at, session.snapshot().await);
            match detail {
                Ok(detail) => form_failure(&page, err, |errors, message| {
                    let view = EditView {
                        detail: &detail,
                        form: &submitted,
                        errors,
                        notice: message.map(|m| ("error", m.to_string())),
                    };
                    views::edit_university(&page, &view)
                }),
                Err(_) => failure(&page, err),
            }
        }
    };
    session.finish(jar, response).await
}

pub async fn new_university(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let snapshot = session.snapshot().await;
    if let Some(target) = university_admin_home(&snapshot, at.locale) {
        return session.finish(jar, Redirect::temporary(&target).into_response()).await;
    }
    let page = Page::new(&state, &at, snapshot);
    let form = CreateUniversityForm::default();
    let errors = FieldErrors::new();
    let view = CreateView {
        form: &form,
        errors: &errors,
        notice: None,
    };
    let response = views::new_university(&page, &view).into_response();
    session.finish(jar, response).await
}

pub async fn create_university(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    if let Some(target) = university_admin_home(&session.snapshot().await, at.locale) {
        return session.finish(jar, Redirect::to(&target).into_response()).await;
    }
    let submitted = CreateUniversityForm::from_pairs(pairs);
    let created = session.catalog().create(submitted.clone()).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match created {
        Ok(university) => {
            info!(university_id = university.id, "opening new university for editing");
            Redirect::to(&edit_path(at.locale, university.id)).into_response()
        }
        Err(err) => form_failure(&page, err, |errors, message| {
            let view = CreateView {
                form: &submitted,
                errors,
                notice: message.map(|m| ("error", m.to_string())),
            };
            views::new_university(&page, &view)
        }),
    };
    session.finish(jar, response).await
}

/// Creating universities is for main administrators only.
fn university_admin_home(session: &AuthSession, locale: Locale) -> Option<String> {
    own_university(session).map(|own| match own {
        Some(id) => edit_path(locale, id),
        None => localized_path(locale, "/"),
    })
}
