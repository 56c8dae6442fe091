use axum::response::Html;
use url::form_urlencoded;

use crate::application::{LoginForm, RegisterForm};
use crate::domain::SiteKind;
use crate::interfaces::http::render::{escape_html, input, notice, Page};
use crate::shared::FieldErrors;

fn action(page: &Page<'_>, path: &str, callback: Option<&str>) -> String {
    let base = page.href(path);
    match callback {
        Some(cb) if !cb.is_empty() => {
            let query = form_urlencoded::Serializer::new(String::new())
                .append_pair("callbackUrl", cb)
                .finish();
            escape_html(&format!("{base}?{query}"))
        }
        _ => base,
    }
}

pub fn login(
    page: &Page<'_>,
    callback: Option<&str>,
    form: &LoginForm,
    errors: &FieldErrors,
    message: Option<&str>,
) -> Html<String> {
    let mut body = format!("<section class=\"auth\"><h1>{}</h1>", page.t("Auth.loginTitle"));
    if let Some(message) = message {
        body.push_str(&notice("error", message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\" novalidate>{}{}<button type=\"submit\">{}</button></form>",
        action(page, "/login", callback),
        input(&page.t("Auth.email"), "email", "email", &form.email, errors),
        input(&page.t("Auth.password"), "password", "password", "", errors),
        page.t("Auth.submitLogin"),
    ));
    if page.site() == SiteKind::Client {
        body.push_str(&format!(
            "<p><a href=\"{}\">{}</a></p>",
            page.href("/register"),
            page.t("Auth.noAccount")
        ));
    }
    body.push_str("</section>");
    page.document(&page.text("Auth.loginTitle"), &body)
}

pub fn register(
    page: &Page<'_>,
    form: &RegisterForm,
    errors: &FieldErrors,
    message: Option<&str>,
) -> Html<String> {
    let mut body = format!("<section class=\"auth\"><h1>{}</h1>", page.t("Auth.registerTitle"));
    if let Some(message) = message {
        body.push_str(&notice("error", message));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\" novalidate>{}{}{}{}{}<button type=\"submit\">{}</button></form>\
         <p><a href=\"{}\">{}</a></p></section>",
        page.href("/register"),
        input(&page.t("Auth.firstName"), "firstName", "text", &form.first_name, errors),
        input(&page.t("Auth.lastName"), "lastName", "text", &form.last_name, errors),
        input(&page.t("Auth.email"), "email", "email", &form.email, errors),
        input(&page.t("Auth.password"), "password", "password", "", errors),
        input(&page.t("Auth.confirmPassword"), "confirmPassword", "password", "", errors),
        page.t("Auth.submitRegister"),
        page.href("/login"),
        page.t("Auth.haveAccount"),
    ));
    page.document(&page.text("Auth.registerTitle"), &body)
}
