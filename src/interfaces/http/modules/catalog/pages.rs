//! Client catalog pages.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use tracing::warn;

use super::{list_cache_header, views};
use crate::application::DataTableParams;
use crate::domain::{CompareList, COMPARE_COOKIE};
use crate::interfaces::http::locale::PageLocale;
use crate::interfaces::http::render::{failure, not_found, Page};
use crate::interfaces::http::session::RequestSession;
use crate::interfaces::http::state::AppState;

pub(super) fn compare_list(jar: &CookieJar) -> CompareList {
    CompareList::decode(jar.get(COMPARE_COOKIE).map(|c| c.value()))
}

pub async fn home(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let popular = match session.catalog().universities(&DataTableParams::default()).await {
        Ok(page) => page.data,
        Err(e) => {
            warn!(error = %e, "popular universities unavailable");
            Vec::new()
        }
    };
    let page = Page::new(&state, &at, session.snapshot().await);
    let response = views::home(&page, &popular, &compare_list(&jar)).into_response();
    session.finish(jar, response).await
}

pub async fn universities(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let params = DataTableParams::from_query(at.query.as_deref().unwrap_or(""));
    let result = session.catalog().universities(&params).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match result {
        Ok(list) => (
            list_cache_header(state.cache_ttl_secs),
            views::list(&page, &params, &list, &compare_list(&jar)),
        )
            .into_response(),
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

pub async fn university(
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
    let result = session.catalog().university(id).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match result {
        Ok(university) => views::detail(&page, &university, &compare_list(&jar)).into_response(),
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}

pub async fn compare(
    State(state): State<AppState>,
    at: PageLocale,
    session: RequestSession,
    jar: CookieJar,
) -> Response {
    let result = session.catalog().compared(&compare_list(&jar)).await;
    let page = Page::new(&state, &at, session.snapshot().await);

    let response = match result {
        Ok(universities) => views::compare(&page, &universities).into_response(),
        Err(err) => failure(&page, err),
    };
    session.finish(jar, response).await
}
