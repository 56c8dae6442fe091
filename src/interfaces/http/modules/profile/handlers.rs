//! Profile API handlers

use axum::response::Response;
use axum::Json;
use axum_extra::extract::CookieJar;

use crate::application::{PasswordForm, ProfileForm};
use crate::domain::User;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::session::RequestSession;

/// `PUT /api/users/profile`
pub async fn update_profile(
    session: RequestSession,
    jar: CookieJar,
    ValidatedJson(form): ValidatedJson<ProfileForm>,
) -> Response {
    let result = session.identity().update_profile(form).await;
    let result = result.map(|update| Json(ApiResponse::<Option<User>>::success(update.session.user)));
    session.respond(jar, result).await
}

/// `PUT /api/users/password`
pub async fn change_password(
    session: RequestSession,
    jar: CookieJar,
    ValidatedJson(form): ValidatedJson<PasswordForm>,
) -> Response {
    let result = session.identity().change_password(form).await;
    session
        .respond(jar, result.map(|()| Json(ApiResponse::success(true))))
        .await
}
