//! Localized profile page.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Form;
use axum_extra::extract::CookieJar;

use super::views::{self, ProfileView};
use crate::application::{PasswordForm, ProfileForm};
use crate::domain::User;
use crate::interfaces::http::locale::PageLocale;
use crate::interfaces::http::render::{failure, form_failure, Page};
use crate::interfaces::http::session::RequestSession;
use crate::interfaces::http::state::AppState;
use crate::shared::{ApiError, AppError};

/// The signed-in user, from the session when it carries one.
async fn load_user(session: &RequestSession) -> Result<User, AppError> {
    match session.snapshot().await.user {
        Some(user) => Ok(user),
        None => session.identity().current_user().await,
    }
}

pub async fn profile_page(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let result = session.identity().current_user().await;
    let page = Page::new(&state, &at, session.snapshot().await);
    let response = match result {
        Ok(user) => views::profile(&page, &ProfileView::new(&user)).into_response(),
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

pub async fn profile_submit(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Form(form): Form<ProfileForm>,
) -> Response {
    let submitted = form.clone();
    let result = session.identity().update_profile(form).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match result {
        Ok(update) => match update.session.user {
            Some(user) => {
                let mut view = ProfileView::new(&user);
                view.notice = Some(("success", page.text("Profile.updated")));
                views::profile(&page, &view).into_response()
            }
            None => failure(&page, AppError::Api(ApiError::Unauthorized)),
        },
        Err(err) => match load_user(&session).await {
            Ok(user) => form_failure(&page, err, |errors, message| {
                let mut view = ProfileView::new(&user);
                view.form = submitted;
                view.profile_errors = errors.clone();
                view.notice = message.map(|m| ("error", m.to_string()));
                views::profile(&page, &view)
            }),
            Err(load_err) => failure(&page, load_err),
        },
    };
    session.finish(jar, response).await
}

pub async fn password_submit(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Form(form): Form<PasswordForm>,
) -> Response {
    let result = session.identity().change_password(form).await;
    let user = load_user(&session).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match (result, user) {
        (Ok(()), Ok(user)) => {
            let mut view = ProfileView::new(&user);
            view.notice = Some(("success", page.text("Profile.passwordChanged")));
            (StatusCode::OK, views::profile(&page, &view)).into_response()
        }
        (Err(err), Ok(user)) => form_failure(&page, err, |errors, message| {
            let mut view = ProfileView::new(&user);
            view.password_errors = errors.clone();
            view.notice = message.map(|m| ("error", m.to_string()));
            views::profile(&page, &view)
        }),
        (_, Err(err)) => failure(&page, err),
    };
    session.finish(jar, response).await
}
