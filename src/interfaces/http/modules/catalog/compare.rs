//! Compare list mutations. The list lives in a cookie; every post
//! redirects back to the page it came from.

use axum::response::{IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::{debug, error};

use super::pages::compare_list;
use crate::domain::{localized_path, CompareList, COMPARE_COOKIE};
use crate::interfaces::http::cookies::{clear_cookie, compare_cookie};
use crate::interfaces::http::locale::PageLocale;
use crate::interfaces::http::modules::auth::safe_callback;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleForm {
    pub id: i64,
    #[serde(default)]
    pub return_to: Option<String>,
}

fn store(jar: CookieJar, list: &CompareList) -> CookieJar {
    if list.is_empty() {
        return jar.add(clear_cookie(COMPARE_COOKIE));
    }
    match list.encode() {
        Ok(value) => jar.add(compare_cookie(&value)),
        Err(e) => {
            error!(error = %e, "failed to encode compare list");
            jar
        }
    }
}

pub async fn toggle(at: PageLocale, jar: CookieJar, Form(form): Form<ToggleForm>) -> Response {
    let mut list = compare_list(&jar);
    let included = list.toggle(form.id);
    debug!(university_id = form.id, included, size = list.len(), "compare list toggled");

    let target = safe_callback(at.locale, form.return_to.as_deref());
    (store(jar, &list), Redirect::to(&target)).into_response()
}

pub async fn clear(at: PageLocale, jar: CookieJar) -> Response {
    let target = localized_path(at.locale, "/compare");
    (jar.add(clear_cookie(COMPARE_COOKIE)), Redirect::to(&target)).into_response()
}
