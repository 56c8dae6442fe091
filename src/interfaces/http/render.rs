//! Server-rendered HTML: document layout, navigation and form helpers.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::{Datelike, NaiveDateTime, Utc};
use tracing::warn;

use super::error::status_of;
use super::locale::PageLocale;
use super::state::AppState;
use crate::application::{login_redirect, DataTableParams, Messages};
use crate::domain::{localized_path, switch_locale_path, AuthSession, Locale, SiteKind};
use crate::shared::{ApiError, AppError, FieldErrors, ListMeta};

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Everything a page template needs about the current request.
pub struct Page<'a> {
    pub state: &'a AppState,
    pub locale: Locale,
    pub path: String,
    pub session: AuthSession,
    messages: Messages<'a>,
}

impl<'a> Page<'a> {
    pub fn new(state: &'a AppState, at: &PageLocale, session: AuthSession) -> Self {
        Self {
            state,
            locale: at.locale,
            path: at.path.clone(),
            session,
            messages: state.catalog.messages(at.locale),
        }
    }

    pub fn site(&self) -> SiteKind {
        self.state.site
    }

    /// Escaped message.
    pub fn t(&self, key: &str) -> String {
        escape_html(&self.messages.t(key))
    }

    /// Unescaped message, for values escaped further down.
    pub fn text(&self, key: &str) -> String {
        self.messages.t(key)
    }

    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        escape_html(&self.messages.format(key, args))
    }

    pub fn href(&self, path: &str) -> String {
        localized_path(self.locale, path)
    }

    /// Image URL safe to render.
    pub fn image(&self, url: Option<&str>) -> String {
        escape_html(&self.state.images.resolve(url))
    }

    pub fn signed_in(&self) -> bool {
        self.session.is_valid()
    }

    pub fn document(&self, title: &str, body: &str) -> Html<String> {
        let site_title = self.t("Metadata.title");
        let full_title = if title.is_empty() {
            site_title
        } else {
            format!("{} | {}", escape_html(title), site_title)
        };
        Html(format!(
            "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <title>{full_title}</title>\n<link rel=\"stylesheet\" href=\"/static/app.css\">\n\
             </head>\n<body class=\"site-{site}\">\n{header}\n<main>\n{body}\n</main>\n{footer}\n</body>\n</html>\n",
            lang = self.locale.code(),
            site = self.site(),
            header = self.header(),
            footer = self.footer(),
        ))
    }

    fn header(&self) -> String {
        let mut nav = String::new();
        let links: &[(&str, &str)] = match self.site() {
            SiteKind::Client => &[
                ("/", "Header.home"),
                ("/universities", "Header.universities"),
                ("/compare", "Header.compare"),
            ],
            SiteKind::Admin if self.signed_in() => &[("/", "Header.dashboard"), ("/users", "Header.users")],
            SiteKind::Admin => &[],
        };
        for (path, key) in links {
            nav.push_str(&format!("<a href=\"{}\">{}</a>", self.href(path), self.t(key)));
        }

        let account = if self.signed_in() {
            let name = self
                .session
                .user
                .as_ref()
                .map(|u| escape_html(&u.full_name()))
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| self.t("Header.profile"));
            format!(
                "<a href=\"{profile}\">{name}</a>\
                 <form method=\"post\" action=\"{logout}\" class=\"inline\">\
                 <button type=\"submit\">{label}</button></form>",
                profile = self.href("/profile"),
                logout = self.href("/logout"),
                label = self.t("Header.logout"),
            )
        } else {
            let mut links = format!("<a href=\"{}\">{}</a>", self.href("/login"), self.t("Header.login"));
            if self.site() == SiteKind::Client {
                links.push_str(&format!(
                    "<a href=\"{}\" class=\"button\">{}</a>",
                    self.href("/register"),
                    self.t("Header.register")
                ));
            }
            links
        };

        format!(
            "<header>\n<nav class=\"main\">{nav}</nav>\n<div class=\"account\">{account}{switcher}</div>\n</header>",
            switcher = self.language_switcher(),
        )
    }

    fn language_switcher(&self) -> String {
        let options: String = Locale::ALL
            .into_iter()
            .map(|l| {
                let class = if l == self.locale { " class=\"active\"" } else { "" };
                format!(
                    "<a href=\"{}\" hreflang=\"{}\"{}>{}</a>",
                    escape_html(&switch_locale_path(&self.path, l)),
                    l.code(),
                    class,
                    l.native_name()
                )
            })
            .collect();
        format!(
            "<div class=\"languages\" aria-label=\"{}\">{}</div>",
            self.t("Header.language"),
            options
        )
    }

    fn footer(&self) -> String {
        match self.site() {
            SiteKind::Client => format!(
                "<footer>&copy; {} Oquga. {}</footer>",
                Utc::now().year(),
                self.t("Footer.rights")
            ),
            SiteKind::Admin => String::new(),
        }
    }
}

// ── Error pages ─────────────────────────────────────────────────

pub fn not_found(page: &Page<'_>) -> Response {
    let body = format!(
        "<section class=\"error\"><h1>404</h1><p>{}</p><a href=\"{}\">{}</a></section>",
        page.t("Errors.notFound"),
        page.href("/"),
        page.t("Errors.backToHome"),
    );
    (StatusCode::NOT_FOUND, page.document(&page.text("Errors.notFound"), &body)).into_response()
}

/// HTML answer for a failed backend call: expired sessions go to the login
/// page, missing records get the 404 page, anything else a generic error.
pub fn failure(page: &Page<'_>, err: AppError) -> Response {
    let status = status_of(&err);
    match status {
        StatusCode::UNAUTHORIZED => {
            let bare = crate::domain::split_locale(&page.path).1.to_string();
            Redirect::to(&login_redirect(page.locale, &bare)).into_response()
        }
        StatusCode::NOT_FOUND => not_found(page),
        _ => {
            warn!(error = %err, path = %page.path, "page failed");
            let status = if status.is_client_error() {
                StatusCode::BAD_GATEWAY
            } else {
                status
            };
            let body = format!(
                "<section class=\"error\"><p>{}</p><a href=\"{}\">{}</a></section>",
                page.t("Errors.generic"),
                page.href("/"),
                page.t("Errors.backToHome"),
            );
            (status, page.document("", &body)).into_response()
        }
    }
}

// ── Forms ───────────────────────────────────────────────────────

/// Re-render a rejected form: field messages for validation failures, the
/// backend's message for other 4xx answers. Everything else is [`failure`].
pub fn form_failure<F>(page: &Page<'_>, err: AppError, render: F) -> Response
where
    F: FnOnce(&FieldErrors, Option<&str>) -> Html<String>,
{
    if let Some(fields) = err.field_errors() {
        return (StatusCode::UNPROCESSABLE_ENTITY, render(fields, None)).into_response();
    }
    match &err {
        AppError::Api(api @ ApiError::Status { status, .. }) if (400..500).contains(status) => {
            let code = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_REQUEST);
            (code, render(&FieldErrors::new(), Some(&api.user_message()))).into_response()
        }
        _ => failure(page, err),
    }
}

pub fn field_errors(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .unwrap_or_default()
        .iter()
        .map(|m| format!("<p class=\"field-error\">{}</p>", escape_html(m)))
        .collect()
}

/// Labelled input with its error messages. Password values are never echoed.
pub fn input(label: &str, name: &str, kind: &str, value: &str, errors: &FieldErrors) -> String {
    let value = if kind == "password" { "" } else { value };
    let invalid = if errors.contains(name) {
        " aria-invalid=\"true\""
    } else {
        ""
    };
    format!(
        "<label>{label}<input type=\"{kind}\" name=\"{name}\" value=\"{value}\"{invalid}></label>{errs}",
        value = escape_html(value),
        errs = field_errors(errors, name),
    )
}

pub fn notice(kind: &str, text: &str) -> String {
    format!("<div class=\"notice notice-{kind}\">{}</div>", escape_html(text))
}

/// Previous/next links keeping every other table parameter.
pub fn pagination(page: &Page<'_>, section: &str, params: &DataTableParams, meta: &ListMeta) -> String {
    if meta.total_pages <= 1 {
        return String::new();
    }
    let base = page.path.as_str();
    let previous = if meta.has_previous() {
        format!(
            "<a href=\"{}\" rel=\"prev\">{}</a>",
            escape_html(&params.page_href(base, meta.page - 1)),
            page.t(&format!("{section}.previous"))
        )
    } else {
        String::new()
    };
    let next = if meta.has_next() {
        format!(
            "<a href=\"{}\" rel=\"next\">{}</a>",
            escape_html(&params.page_href(base, meta.page + 1)),
            page.t(&format!("{section}.next"))
        )
    } else {
        String::new()
    };
    format!(
        "<nav class=\"pagination\">{previous}<span>{}</span>{next}</nav>",
        page.format(
            &format!("{section}.page"),
            &[("page", &meta.page.to_string()), ("total", &meta.total_pages.to_string())]
        )
    )
}

pub fn format_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_is_escaped() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
    }

    #[test]
    fn password_inputs_do_not_echo() {
        let mut errors = FieldErrors::new();
        errors.add("password", "too short");
        let html = input("Password", "password", "password", "secret", &errors);
        assert!(!html.contains("secret"));
        assert!(html.contains("aria-invalid"));
        assert!(html.contains("too short"));
    }

    #[test]
    fn dates_render_day_first() {
        let date = NaiveDateTime::parse_from_str("2025-01-12T10:15:30", "%Y-%m-%dT%H:%M:%S").ok();
        assert_eq!(format_date(date), "12.01.2025");
        assert_eq!(format_date(None), "—");
    }
}
