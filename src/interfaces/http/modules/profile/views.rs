use axum::response::Html;

use crate::application::ProfileForm;
use crate::domain::{SiteKind, User};
use crate::interfaces::http::render::{escape_html, input, notice, Page};
use crate::shared::FieldErrors;

pub struct ProfileView<'a> {
    pub user: &'a User,
    pub form: ProfileForm,
    pub profile_errors: FieldErrors,
    pub password_errors: FieldErrors,
    /// `(kind, text)` banner above the forms.
    pub notice: Option<(&'static str, String)>,
}

impl<'a> ProfileView<'a> {
    pub fn new(user: &'a User) -> Self {
        Self {
            user,
            form: ProfileForm {
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            profile_errors: FieldErrors::new(),
            password_errors: FieldErrors::new(),
            notice: None,
        }
    }
}

pub fn profile(page: &Page<'_>, view: &ProfileView<'_>) -> Html<String> {
    let user = view.user;
    let mut body = format!(
        "<section class=\"profile\"><div class=\"avatar\">{}</div><h1>{}</h1>\
         <dl><dt>{}</dt><dd>{}</dd><dt>{}</dt><dd>{}</dd></dl>",
        escape_html(&user.initials()),
        page.t("Profile.title"),
        page.t("Profile.email"),
        escape_html(&user.email),
        page.t("Profile.role"),
        escape_html(&user.role),
    );
    if let Some((kind, text)) = &view.notice {
        body.push_str(&notice(kind, text));
    }

    let edit_title = match page.site() {
        SiteKind::Client => format!("<h2>{}</h2>", page.t("Profile.editTitle")),
        SiteKind::Admin => String::new(),
    };
    body.push_str(&format!(
        "{edit_title}<form method=\"post\" action=\"{}\" novalidate>{}{}<button type=\"submit\">{}</button></form>",
        page.href("/profile"),
        input(&page.t("Profile.firstName"), "firstName", "text", &view.form.first_name, &view.profile_errors),
        input(&page.t("Profile.lastName"), "lastName", "text", &view.form.last_name, &view.profile_errors),
        page.t("Profile.save"),
    ));

    if page.site() == SiteKind::Client {
        let errors = &view.password_errors;
        body.push_str(&format!(
            "<h2>{}</h2><form method=\"post\" action=\"{}\" novalidate>{}{}{}<button type=\"submit\">{}</button></form>",
            page.t("Profile.securityTitle"),
            page.href("/profile/password"),
            input(&page.t("Profile.currentPassword"), "currentPassword", "password", "", errors),
            input(&page.t("Profile.newPassword"), "newPassword", "password", "", errors),
            input(&page.t("Profile.confirmNewPassword"), "confirmNewPassword", "password", "", errors),
            page.t("Profile.changePassword"),
        ));
    }
    body.push_str("</section>");
    page.document(&page.text("Profile.title"), &body)
}
