//! Router of one site: localized pages, the `/api` JSON surface, health and
//! static assets, wrapped in the gate, locale, trace and request-id layers.

use axum::{
    extract::State,
    http::{header::ACCEPT_LANGUAGE, HeaderMap, Method, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post, put},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::common::ApiResponse;
use super::cookies::LOCALE_COOKIE;
use super::locale::PageLocale;
use super::middleware::{gate_middleware, locale_cookie_middleware};
use super::modules::{admin, assets, auth, catalog, health, profile, request_id};
use super::render::{not_found, Page};
use super::state::AppState;
use crate::domain::{localized_path, negotiate, split_locale, AuthSession, SiteKind};

/// `/` goes to the visitor's preferred locale.
async fn root_redirect(
    State(state): State<AppState>,
    jar: CookieJar,
    headers: HeaderMap,
) -> Redirect {
    let locale = negotiate(
        jar.get(LOCALE_COOKIE).map(|c| c.value()),
        headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok()),
        state.default_locale,
    );
    Redirect::temporary(&localized_path(locale, "/"))
}

async fn fallback(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if path == "/api" || path.starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::<()>::error("Not found")),
        )
            .into_response();
    }
    let locale = split_locale(path).0.unwrap_or(state.default_locale);
    let at = PageLocale {
        locale,
        path: localized_path(locale, "/"),
        query: None,
    };
    not_found(&Page::new(&state, &at, AuthSession::anonymous()))
}

fn api_routes(site: SiteKind) -> Router<AppState> {
    let router = Router::new()
        .route("/api/auth/login", post(auth::handlers::login))
        .route("/api/auth/refresh", post(auth::handlers::refresh))
        .route("/api/auth/logout", post(auth::handlers::logout))
        .route("/api/auth/me", get(auth::handlers::me))
        .route("/api/users/profile", put(profile::handlers::update_profile))
        .route("/api/users/password", put(profile::handlers::change_password));

    match site {
        SiteKind::Client => router.route("/api/auth/register", post(auth::handlers::register)),
        SiteKind::Admin => router,
    }
}

fn page_routes(site: SiteKind) -> Router<AppState> {
    let shared = Router::new()
        .route(
            "/{locale}/login",
            get(auth::pages::login_page).post(auth::pages::login_submit),
        )
        .route("/{locale}/logout", post(auth::pages::logout_submit))
        .route(
            "/{locale}/profile",
            get(profile::pages::profile_page).post(profile::pages::profile_submit),
        );

    match site {
        SiteKind::Client => shared
            .route("/{locale}", get(catalog::pages::home))
            .route(
                "/{locale}/register",
                get(auth::pages::register_page).post(auth::pages::register_submit),
            )
            .route("/{locale}/profile/password", post(profile::pages::password_submit))
            .route("/{locale}/universities", get(catalog::pages::universities))
            .route("/{locale}/universities/{id}", get(catalog::pages::university))
            .route("/{locale}/compare", get(catalog::pages::compare))
            .route("/{locale}/compare/toggle", post(catalog::compare::toggle))
            .route("/{locale}/compare/clear", post(catalog::compare::clear)),
        SiteKind::Admin => shared
            .route("/{locale}", get(admin::pages::dashboard))
            .route(
                "/{locale}/users",
                get(admin::pages::users).post(admin::pages::create_user),
            )
            .route(
                "/{locale}/universities/new",
                get(admin::pages::new_university).post(admin::pages::create_university),
            )
            .route(
                "/{locale}/universities/{id}/edit",
                get(admin::pages::edit_university).post(admin::pages::update_university),
            ),
    }
}

pub fn create_router(state: AppState) -> Router {
    let health_cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/", get(root_redirect))
        .route("/health", get(health::health_check).layer(health_cors))
        .route("/static/app.css", get(assets::stylesheet))
        .route("/static/dummy-poster.svg", get(assets::placeholder_image))
        .merge(api_routes(state.site))
        .merge(page_routes(state.site))
        .fallback(fallback)
        .layer(middleware::from_fn(locale_cookie_middleware))
        .layer(middleware::from_fn_with_state(state.clone(), gate_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id::request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::config::AppConfig;
    use crate::domain::Locale;
    use crate::interfaces::http::modules::health::HealthResponse;
    use crate::interfaces::http::modules::request_id::REQUEST_ID_HEADER;

    const VALID_CLIENT_COOKIE: &str = "client-auth-storage=%7B%22state%22%3A%7B%22isAuthenticated%22%3Atrue%2C%22accessToken%22%3A%22t-1%22%7D%7D";

    fn app_with_backend(site: SiteKind, backend: &str) -> Router {
        let mut config = AppConfig::default();
        config.site.kind = site;
        config.backend.base_url = backend.to_string();
        create_router(AppState::from_config(&config).unwrap())
    }

    /// Nothing listens on the discard port: backend calls fail fast.
    fn app(site: SiteKind) -> Router {
        app_with_backend(site, "http://127.0.0.1:9")
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response.headers()[LOCATION].to_str().unwrap()
    }

    fn set_cookies(response: &Response) -> Vec<String> {
        response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn health_reports_site() {
        let response = app(SiteKind::Admin).oneshot(get_req("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));

        let health: HealthResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.site, "admin");
    }

    #[tokio::test]
    async fn root_negotiates_locale() {
        let request = Request::builder()
            .uri("/")
            .header(ACCEPT_LANGUAGE, "kk-KZ,ru;q=0.8")
            .body(Body::empty())
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/kk");

        let request = Request::builder()
            .uri("/")
            .header(ACCEPT_LANGUAGE, "kk")
            .header(COOKIE, "locale=en")
            .body(Body::empty())
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(location(&response), "/en");
    }

    #[tokio::test]
    async fn every_locale_serves_pages_and_is_remembered() {
        for locale in Locale::ALL {
            let uri = format!("/{}/login", locale.code());
            let response = app(SiteKind::Client).oneshot(get_req(&uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            assert!(set_cookies(&response)
                .iter()
                .any(|c| c.starts_with(&format!("locale={}", locale.code()))));
            let html = body_text(response).await;
            assert!(html.contains(&format!("<html lang=\"{}\">", locale.code())));
        }
    }

    #[tokio::test]
    async fn unsupported_locale_is_not_found() {
        let response = app(SiteKind::Client)
            .oneshot(get_req("/de/universities"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app(SiteKind::Client).oneshot(get_req("/api/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_text(response).await.contains("\"success\":false"));
    }

    #[tokio::test]
    async fn unsupported_locale_is_not_found_on_both_sites() {
        for site in [SiteKind::Client, SiteKind::Admin] {
            let response = app(site).oneshot(get_req("/de/x")).await.unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{site}");
            assert!(response.headers().get(LOCATION).is_none());
        }
    }

    #[tokio::test]
    async fn protected_prefix_covers_longer_paths() {
        let response = app(SiteKind::Client)
            .oneshot(get_req("/ru/dashboard-old"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/ru/login?callbackUrl=%2Fdashboard-old");
    }

    #[tokio::test]
    async fn protected_page_redirects_to_localized_login() {
        let response = app(SiteKind::Client).oneshot(get_req("/kk/profile")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/kk/login?callbackUrl=%2Fprofile");

        let response = app(SiteKind::Admin).oneshot(get_req("/en")).await.unwrap();
        assert_eq!(location(&response), "/en/login?callbackUrl=%2F");
    }

    #[tokio::test]
    async fn signed_in_visitor_skips_login() {
        let request = Request::builder()
            .uri("/ru/login")
            .header(COOKIE, VALID_CLIENT_COOKIE)
            .body(Body::empty())
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/ru");
    }

    #[tokio::test]
    async fn garbage_cookie_is_anonymous() {
        let request = Request::builder()
            .uri("/ru/login")
            .header(COOKIE, "client-auth-storage=not-json")
            .body(Body::empty())
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn register_mismatch_is_rejected_locally() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/auth/register")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"firstName":"Aigerim","lastName":"Nurlanova","email":"a@oquga.kz","password":"password1","confirmPassword":"password2"}"#,
            ))
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["fields"]["confirmPassword"][0], "passwords do not match");
    }

    #[tokio::test]
    async fn register_form_rerenders_with_field_messages() {
        let request = Request::builder()
            .method("POST")
            .uri("/en/register")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(
                "firstName=A&lastName=Nurlanova&email=bad&password=password1&confirmPassword=password2",
            ))
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains("passwords do not match"));
        assert!(html.contains("value=\"Nurlanova\""));
        assert!(!html.contains("password1"));
    }

    #[tokio::test]
    async fn logout_clears_cookies_even_when_backend_is_down() {
        let request = Request::builder()
            .method("POST")
            .uri("/ru/logout")
            .header(COOKIE, format!("{VALID_CLIENT_COOKIE}; refreshToken=r-1"))
            .body(Body::empty())
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/ru");

        let cookies = set_cookies(&response);
        assert!(cookies
            .iter()
            .any(|c| c.starts_with("client-auth-storage=;") && c.contains("Max-Age=0")));
        assert!(cookies
            .iter()
            .any(|c| c.starts_with("refreshToken=;") && c.contains("Max-Age=0")));
    }

    #[tokio::test]
    async fn compare_toggle_updates_cookie() {
        let request = Request::builder()
            .method("POST")
            .uri("/ru/compare/toggle")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("id=5&returnTo=%2Fru%2Funiversities%3Fpage%3D2"))
            .unwrap();
        let response = app(SiteKind::Client).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/ru/universities?page=2");
        assert!(set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("university-compare-storage=")));
    }

    #[tokio::test]
    async fn static_assets_are_served() {
        let response = app(SiteKind::Client)
            .oneshot(get_req("/static/app.css"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "text/css; charset=utf-8");
    }

    // ── Against a stub backend ──────────────────────────────────

    async fn spawn_backend() -> String {
        let universities = get(|| async {
            Json(serde_json::json!({
                "data": [{
                    "id": 1,
                    "photoUrl": "https://evil.example/x.png",
                    "translations": {"ru": {"name": "КазНУ", "city": "Алматы"}},
                    "progressPercent": 80
                }],
                "meta": {"total": 1, "page": 1, "limit": 10, "totalPages": 1}
            }))
        });
        let login = post(|| async {
            (
                [(SET_COOKIE, "refreshToken=r-1; HttpOnly; Path=/")],
                Json(serde_json::json!({
                    "accessToken": "t-1",
                    "user": {"id": 7, "email": "a@oquga.kz", "firstName": "Aigerim", "lastName": "Nurlanova", "role": "USER"}
                })),
            )
        });
        let backend = Router::new()
            .route("/api/v1/universities", universities)
            .route("/api/v1/auth/login", login);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn list_page_is_cacheable_and_hides_foreign_images() {
        let backend = spawn_backend().await;
        let response = app_with_backend(SiteKind::Client, &backend)
            .oneshot(get_req("/ru/universities?search=%D0%9A"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CACHE_CONTROL], "public, max-age=60");

        let html = body_text(response).await;
        assert!(html.contains("КазНУ"));
        assert!(html.contains("/static/dummy-poster.svg"));
        assert!(!html.contains("evil.example"));
    }

    #[tokio::test]
    async fn login_form_sets_both_cookies_and_follows_callback() {
        let backend = spawn_backend().await;
        let request = Request::builder()
            .method("POST")
            .uri("/kk/login?callbackUrl=%2Fprofile")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("email=a%40oquga.kz&password=secret1"))
            .unwrap();
        let response = app_with_backend(SiteKind::Client, &backend)
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/kk/profile");

        let cookies = set_cookies(&response);
        let mirror = cookies
            .iter()
            .find(|c| c.starts_with("client-auth-storage="))
            .unwrap();
        assert!(!mirror.contains("HttpOnly"));
        let refresh = cookies.iter().find(|c| c.starts_with("refreshToken=r-1")).unwrap();
        assert!(refresh.contains("HttpOnly"));
        assert!(refresh.contains("SameSite=Strict"));
    }

    // ── Admin site against a stub backend ───────────────────────

    fn admin_cookie(role: &str, university_id: Option<i64>) -> String {
        let state = serde_json::json!({
            "state": {
                "user": {
                    "id": 3,
                    "email": "admin@oquga.kz",
                    "firstName": "Dana",
                    "lastName": "Sarsen",
                    "role": role,
                    "universityId": university_id
                },
                "accessToken": "t-1",
                "isAuthenticated": true
            },
            "version": 0
        });
        format!("auth-storage={}", urlencoding::encode(&state.to_string()))
    }

    fn main_admin() -> String {
        admin_cookie("MAIN_ADMIN", None)
    }

    fn admin_get(uri: &str, cookie: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    }

    fn admin_post(uri: &str, cookie: &str, form: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(COOKIE, cookie)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap()
    }

    async fn spawn_admin_backend() -> String {
        use axum::extract::{Path as UrlPath, Query};

        let detail = get(|UrlPath(id): UrlPath<i64>| async move {
            Json(serde_json::json!({
                "id": id,
                "slug": "kaznu",
                "websiteUrl": "https://kaznu.kz",
                "translations": {"ru": {"name": "КазНУ", "goal": "Наука"}},
                "faculties": [{"id": 1}],
                "progress": {
                    "totalPercent": 35,
                    "tuition": {"name": "tuition", "percent": 5, "maxPercent": 10, "filledFields": 1, "totalFields": 2}
                }
            }))
        });
        let update = put(|UrlPath(id): UrlPath<i64>, Json(body): Json<serde_json::Value>| async move {
            Json(serde_json::json!({
                "id": id,
                "websiteUrl": body["websiteUrl"],
                "translations": body["translations"],
                "progress": {"totalPercent": 60}
            }))
        });
        let create = post(|Json(body): Json<serde_json::Value>| async move {
            if body["slug"] == "kaznu" {
                return (
                    StatusCode::CONFLICT,
                    Json(serde_json::json!({"message": "Slug already exists"})),
                )
                    .into_response();
            }
            (
                StatusCode::CREATED,
                Json(serde_json::json!({"id": 42, "slug": body["slug"]})),
            )
                .into_response()
        });
        let admins = get(|Query(query): Query<std::collections::HashMap<String, String>>| async move {
            let role = query.get("role").cloned().unwrap_or_else(|| "any".into());
            let university = query.get("universityId").cloned().unwrap_or_else(|| "any".into());
            Json(serde_json::json!({
                "data": [{
                    "id": 8,
                    "email": format!("{role}-{university}@oquga.kz"),
                    "firstName": "Ali",
                    "lastName": "Nur",
                    "isActive": true
                }],
                "meta": {"total": 1, "page": 1, "limit": 10, "totalPages": 1}
            }))
        })
        .post(|| async { (StatusCode::CREATED, "University Admin created successfully") });

        let backend = Router::new()
            .route("/api/v1/universities", create)
            .route("/api/v1/universities/{id}", update)
            .route("/api/v1/universities/{id}/detail", detail)
            .route("/api/v1/admin/university-admins", admins);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, backend).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn university_admin_lands_on_own_university() {
        let cookie = admin_cookie("UNIVERSITY_ADMIN", Some(5));
        let response = app(SiteKind::Admin).oneshot(admin_get("/ru", &cookie)).await.unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(location(&response), "/ru/universities/5/edit");

        for uri in ["/kk/universities/6/edit", "/kk/universities/new"] {
            let response = app(SiteKind::Admin).oneshot(admin_get(uri, &cookie)).await.unwrap();
            assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT, "{uri}");
            assert_eq!(location(&response), "/kk/universities/5/edit", "{uri}");
        }
    }

    #[tokio::test]
    async fn edit_page_shows_stored_values_and_progress() {
        let backend = spawn_admin_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_get("/ru/universities/5/edit", &main_admin()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<h1>КазНУ</h1>"));
        assert!(html.contains("name=\"translations.ru.goal\""));
        assert!(html.contains(">Наука</textarea>"));
        assert!(html.contains("value=\"https://kaznu.kz\""));
        assert!(html.contains("35%"));
        assert!(html.contains("Стоимость обучения"));
        assert!(html.contains("5/10%"));
    }

    #[tokio::test]
    async fn edit_submission_rerenders_with_saved_values() {
        let backend = spawn_admin_backend().await;
        let form = "websiteUrl=https%3A%2F%2Fkaznu.edu.kz&translations.en.name=KazNU&translations.en.city=Almaty";
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_post("/en/universities/5/edit", &main_admin(), form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("Changes saved"));
        assert!(html.contains("value=\"https://kaznu.edu.kz\""));
        assert!(html.contains("value=\"Almaty\""));
        assert!(html.contains("60%"));
    }

    #[tokio::test]
    async fn edit_without_any_name_keeps_input() {
        let backend = spawn_admin_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_post(
                "/en/universities/5/edit",
                &main_admin(),
                "translations.kk.city=Astana&foundedYear=abc",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let html = body_text(response).await;
        assert!(html.contains(crate::application::catalog::NAME_REQUIRED));
        assert!(html.contains("value=\"Astana\""));
        assert!(html.contains("value=\"abc\""));
        assert!(html.contains("35%"));
    }

    #[tokio::test]
    async fn created_university_opens_in_editor() {
        let backend = spawn_admin_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_post(
                "/ru/universities/new",
                &main_admin(),
                "slug=satbayev&translations.ru.name=Satbayev+University",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/ru/universities/42/edit");
    }

    #[tokio::test]
    async fn taken_slug_shows_backend_message() {
        let backend = spawn_admin_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_post(
                "/ru/universities/new",
                &main_admin(),
                "slug=kaznu&translations.ru.name=KazNU",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let html = body_text(response).await;
        assert!(html.contains("Slug already exists"));
        assert!(html.contains("value=\"kaznu\""));
    }

    #[tokio::test]
    async fn dashboard_offers_new_university_to_main_admin() {
        let backend = spawn_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_get("/en", &main_admin()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("href=\"/en/universities/new\""));
        assert!(html.contains("href=\"/en/universities/1/edit\""));
    }

    #[tokio::test]
    async fn admin_creation_accepts_text_confirmation() {
        let backend = spawn_admin_backend().await;
        let form = "firstName=Dana&lastName=Sarsen&email=dana%40kaznu.kz&password=secret12&universityId=4";
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_post("/ru/users", &main_admin(), form))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("Администратор создан"));
    }

    #[tokio::test]
    async fn user_filters_reach_backend() {
        let backend = spawn_admin_backend().await;
        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_get(
                "/en/users?role=UNIVERSITY_ADMIN&universityId=5",
                &main_admin(),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("UNIVERSITY_ADMIN-5@oquga.kz"));
        assert!(html.contains("<option value=\"UNIVERSITY_ADMIN\" selected>"));
        assert!(html.contains("name=\"universityId\" min=\"1\" value=\"5\""));

        let response = app_with_backend(SiteKind::Admin, &backend)
            .oneshot(admin_get("/en/users?role=all", &main_admin()))
            .await
            .unwrap();
        assert!(body_text(response).await.contains("any-any@oquga.kz"));
    }
}
