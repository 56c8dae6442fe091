//! Authentication API handlers

use axum::response::Response;
use axum::Json;
use axum_extra::extract::CookieJar;

use crate::application::{LoginForm, RegisterForm};
use crate::domain::{AuthSession, User};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::session::RequestSession;

fn session_body(session: AuthSession) -> Json<ApiResponse<AuthSession>> {
    Json(ApiResponse::success(session))
}

/// `POST /api/auth/login`
pub async fn login(
    session: RequestSession,
    jar: CookieJar,
    ValidatedJson(form): ValidatedJson<LoginForm>,
) -> Response {
    let result = session.identity().login(form).await;
    session
        .respond(jar, result.map(|update| session_body(update.session)))
        .await
}

/// `POST /api/auth/register`
pub async fn register(
    session: RequestSession,
    jar: CookieJar,
    ValidatedJson(form): ValidatedJson<RegisterForm>,
) -> Response {
    let result = session.identity().register(form).await;
    session
        .respond(jar, result.map(|update| session_body(update.session)))
        .await
}

/// `POST /api/auth/refresh`
pub async fn refresh(session: RequestSession, jar: CookieJar) -> Response {
    let result = session.identity().refresh().await;
    session
        .respond(jar, result.map(|update| session_body(update.session)))
        .await
}

/// `POST /api/auth/logout`
pub async fn logout(session: RequestSession, jar: CookieJar) -> Response {
    let result = session.identity().logout().await;
    session
        .respond(jar, result.map(|update| session_body(update.session)))
        .await
}

/// `GET /api/auth/me`
pub async fn me(session: RequestSession, jar: CookieJar) -> Response {
    let result = session.identity().current_user().await;
    session
        .respond(jar, result.map(|user| Json(ApiResponse::<User>::success(user))))
        .await
}
