//! Localized sign-in, registration and sign-out pages.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::views;
use crate::application::{LoginForm, RegisterForm};
use crate::domain::{localized_path, split_locale, Locale, SiteKind};
use crate::interfaces::http::locale::PageLocale;
use crate::interfaces::http::render::{form_failure, Page};
use crate::interfaces::http::session::RequestSession;
use crate::interfaces::http::state::AppState;
use crate::shared::FieldErrors;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackQuery {
    #[serde(default)]
    pub callback_url: Option<String>,
}

/// Where to go after signing in. Only same-site paths are followed; a path
/// without a locale prefix gets the current one.
pub fn safe_callback(locale: Locale, callback: Option<&str>) -> String {
    match callback.map(str::trim) {
        Some(cb) if cb.starts_with('/') && !cb.starts_with("//") && !cb.contains('\\') => {
            match split_locale(cb) {
                (Some(_), _) => cb.to_string(),
                (None, _) => localized_path(locale, cb),
            }
        }
        _ => localized_path(locale, "/"),
    }
}

pub async fn login_page(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let page = Page::new(&state, &at, session.snapshot().await);
    views::login(
        &page,
        query.callback_url.as_deref(),
        &LoginForm::default(),
        &FieldErrors::new(),
        None,
    )
    .into_response()
}

pub async fn login_submit(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Query(query): Query<CallbackQuery>,
    Form(form): Form<LoginForm>,
) -> Response {
    let submitted = form.clone();
    match session.identity().login(form).await {
        Ok(_) => {
            let target = safe_callback(at.locale, query.callback_url.as_deref());
            session.finish(jar, Redirect::to(&target).into_response()).await
        }
        Err(err) => {
            let page = Page::new(&state, &at, session.snapshot().await);
            let callback = query.callback_url.as_deref();
            form_failure(&page, err, |errors, message| {
                views::login(&page, callback, &submitted, errors, message)
            })
        }
    }
}

pub async fn register_page(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
) -> Response {
    let page = Page::new(&state, &at, session.snapshot().await);
    views::register(&page, &RegisterForm::default(), &FieldErrors::new(), None).into_response()
}

pub async fn register_submit(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
    Form(form): Form<RegisterForm>,
) -> Response {
    let submitted = form.clone();
    match session.identity().register(form).await {
        Ok(_) => {
            let home = localized_path(at.locale, "/");
            session.finish(jar, Redirect::to(&home).into_response()).await
        }
        Err(err) => {
            let page = Page::new(&state, &at, session.snapshot().await);
            form_failure(&page, err, |errors, message| {
                views::register(&page, &submitted, errors, message)
            })
        }
    }
}

/// Signs out and clears both auth cookies, even when the backend is down.
pub async fn logout_submit(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let target = match state.site {
        SiteKind::Admin => localized_path(at.locale, "/login"),
        SiteKind::Client => localized_path(at.locale, "/"),
    };
    match session.identity().logout().await {
        Ok(_) => session.finish(jar, Redirect::to(&target).into_response()).await,
        Err(err) => err.into_response(),
    }
}
