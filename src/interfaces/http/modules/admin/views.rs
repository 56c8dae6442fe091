use axum::response::Html;

use crate::application::catalog::TranslationFields;
use crate::application::{
    CreateUniversityAdminForm, CreateUniversityForm, DataTableParams, UniversityEditForm,
    ALL_FILTER,
};
use crate::domain::{Locale, University, UniversityAdmin, UniversityDetail, UniversityProgress};
use crate::interfaces::http::render::{
    escape_html, field_errors, format_date, input, notice, pagination, Page,
};
use crate::shared::{FieldErrors, Paginated};

pub const UNIVERSITY_ADMIN_ROLE: &str = "UNIVERSITY_ADMIN";
pub const MAIN_ADMIN_ROLE: &str = "MAIN_ADMIN";

const STATUS_OPTIONS: &[(&str, &str)] = &[
    (ALL_FILTER, "Dashboard.statusAll"),
    ("published", "Dashboard.statusPublished"),
    ("draft", "Dashboard.statusDraft"),
];

const ROLE_OPTIONS: &[(&str, &str)] = &[
    (ALL_FILTER, "Users.roleAll"),
    (MAIN_ADMIN_ROLE, "Users.roleMain"),
    (UNIVERSITY_ADMIN_ROLE, "Users.roleUniversity"),
];

/// `(input name, message key, multi-line)` of every translated text.
const EDIT_TEXTS: &[(&str, &str, bool)] = &[
    ("name", "University.name", false),
    ("city", "University.city", false),
    ("shortDescription", "University.shortDescription", true),
    ("description", "University.description", true),
    ("goal", "University.goal", true),
    ("address", "University.address", false),
    ("historyText", "University.historyText", true),
];

const CREATE_TEXTS: &[(&str, &str, bool)] = &[
    ("name", "University.name", false),
    ("city", "University.city", false),
    ("description", "University.description", true),
];

fn select(page: &Page<'_>, label: &str, name: &str, current: &str, options: &[(&str, &str)]) -> String {
    let options: String = options
        .iter()
        .map(|(value, key)| {
            let selected = if current == *value { " selected" } else { "" };
            format!("<option value=\"{value}\"{selected}>{}</option>", page.t(key))
        })
        .collect();
    format!("<label>{}<select name=\"{name}\">{options}</select></label>", page.t(label))
}

fn filters(page: &Page<'_>, params: &DataTableParams, controls: &str, placeholder: &str) -> String {
    format!(
        "<form method=\"get\" action=\"{path}\" class=\"filters\" role=\"search\">\
         <input type=\"search\" name=\"search\" value=\"{search}\" placeholder=\"{placeholder}\">\
         {controls}<button type=\"submit\">{apply}</button><a href=\"{path}\">{reset}</a></form>",
        path = escape_html(&page.path),
        search = escape_html(params.search()),
        apply = page.t("Dashboard.apply"),
        reset = page.t("Dashboard.reset"),
    )
}

pub fn dashboard(page: &Page<'_>, params: &DataTableParams, result: &Paginated<University>) -> Html<String> {
    let status = select(page, "Dashboard.status", "status", params.status(), STATUS_OPTIONS);
    let add = if page.session.user.as_ref().is_some_and(|u| u.role == UNIVERSITY_ADMIN_ROLE) {
        String::new()
    } else {
        format!(
            "<a href=\"{}\" class=\"button\">{}</a>",
            page.href("/universities/new"),
            page.t("University.add")
        )
    };
    let mut body = format!(
        "<section><h1>{}</h1>{add}{}",
        page.t("Dashboard.title"),
        filters(page, params, &status, &page.t("Dashboard.search")),
    );
    if result.data.is_empty() {
        body.push_str(&notice("info", &page.text("Dashboard.empty")));
    } else {
        body.push_str(&format!(
            "<table><thead><tr><th>ID</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>",
            page.t("Dashboard.name"),
            page.t("Dashboard.city"),
            page.t("Dashboard.progress"),
            page.t("Dashboard.updated"),
        ));
        for university in &result.data {
            let city = university
                .translation(page.locale)
                .and_then(|t| t.city.as_deref())
                .unwrap_or("—");
            let state = if university.is_complete() { "complete" } else { "partial" };
            body.push_str(&format!(
                "<tr><td>{}</td><td><a href=\"{edit}\">{}</a></td><td>{}</td>\
                 <td><progress class=\"{state}\" max=\"100\" value=\"{pct}\"></progress> {pct}%</td><td>{}</td></tr>",
                university.id,
                escape_html(&university.display_name(page.locale)),
                escape_html(city),
                format_date(university.updated_at.or(university.created_at)),
                pct = university.progress_percent,
                edit = page.href(&format!("/universities/{}/edit", university.id)),
            ));
        }
        body.push_str("</tbody></table>");
    }
    body.push_str(&pagination(page, "Dashboard", params, &result.meta));
    body.push_str("</section>");
    page.document(&page.text("Dashboard.title"), &body)
}

pub struct UsersView<'a> {
    pub params: &'a DataTableParams,
    pub admins: Option<&'a Paginated<UniversityAdmin>>,
    pub form: &'a CreateUniversityAdminForm,
    pub errors: &'a FieldErrors,
    pub notice: Option<(&'static str, String)>,
}

pub fn users(page: &Page<'_>, view: &UsersView<'_>) -> Html<String> {
    let controls = format!(
        "{}<label>{}<input type=\"number\" name=\"universityId\" min=\"1\" value=\"{}\"></label>",
        select(page, "Users.role", "role", view.params.get("role").unwrap_or(ALL_FILTER), ROLE_OPTIONS),
        page.t("Users.universityId"),
        escape_html(view.params.get("universityId").unwrap_or("")),
    );
    let mut body = format!(
        "<section><h1>{}</h1>{}",
        page.t("Users.title"),
        filters(page, view.params, &controls, &page.t("Users.search")),
    );
    if let Some((kind, text)) = &view.notice {
        body.push_str(&notice(kind, text));
    }

    match view.admins {
        Some(admins) if !admins.data.is_empty() => {
            body.push_str(&format!(
                "<table><thead><tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr></thead><tbody>",
                page.t("Users.firstName"),
                page.t("Users.email"),
                page.t("Users.university"),
                page.t("Users.status"),
                page.t("Users.created"),
            ));
            for admin in &admins.data {
                let university = admin
                    .university_name
                    .clone()
                    .or_else(|| admin.university_id.map(|id| format!("#{id}")))
                    .unwrap_or_else(|| "—".to_string());
                let status = if admin.is_active { "Users.active" } else { "Users.inactive" };
                body.push_str(&format!(
                    "<tr><td>{} {}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                    escape_html(&admin.first_name),
                    escape_html(&admin.last_name),
                    escape_html(&admin.email),
                    escape_html(&university),
                    page.t(status),
                    format_date(admin.created_at),
                ));
            }
            body.push_str("</tbody></table>");
            body.push_str(&pagination(page, "Dashboard", view.params, &admins.meta));
        }
        Some(_) => body.push_str(&notice("info", &page.text("Users.empty"))),
        None => body.push_str(&notice("error", &page.text("Errors.generic"))),
    }

    let form = view.form;
    let university_id = if form.university_id > 0 {
        form.university_id.to_string()
    } else {
        String::new()
    };
    body.push_str(&format!(
        "<h2>{}</h2><form method=\"post\" action=\"{}\" novalidate>{}{}{}{}{}<button type=\"submit\">{}</button></form></section>",
        page.t("Users.create"),
        page.href("/users"),
        input(&page.t("Users.firstName"), "firstName", "text", &form.first_name, view.errors),
        input(&page.t("Users.lastName"), "lastName", "text", &form.last_name, view.errors),
        input(&page.t("Users.email"), "email", "email", &form.email, view.errors),
        input(&page.t("Users.password"), "password", "password", "", view.errors),
        input(&page.t("Users.universityId"), "universityId", "number", &university_id, view.errors),
        page.t("Users.create"),
    ));
    page.document(&page.text("Users.title"), &body)
}

fn text_area(label: &str, name: &str, value: &str, errors: &FieldErrors) -> String {
    let invalid = if errors.contains(name) { " aria-invalid=\"true\"" } else { "" };
    format!(
        "<label>{label}<textarea name=\"{name}\" rows=\"4\"{invalid}>{}</textarea></label>{}",
        escape_html(value),
        field_errors(errors, name),
    )
}

fn translation_value<'f>(fields: Option<&'f TranslationFields>, name: &str) -> &'f str {
    let Some(f) = fields else { return "" };
    match name {
        "name" => &f.name,
        "city" => &f.city,
        "shortDescription" => &f.short_description,
        "description" => &f.description,
        "goal" => &f.goal,
        "address" => &f.address,
        "historyText" => &f.history_text,
        _ => "",
    }
}

/// One fieldset per locale; inputs are named `translations.<locale>.<field>`.
fn translation_fieldsets<'f>(
    page: &Page<'_>,
    texts: &[(&str, &str, bool)],
    errors: &FieldErrors,
    lookup: impl Fn(Locale) -> Option<&'f TranslationFields>,
) -> String {
    let mut out = format!(
        "<h2>{}</h2>{}",
        page.t("University.translations"),
        field_errors(errors, "translations")
    );
    for locale in Locale::ALL {
        let fields = lookup(locale);
        out.push_str(&format!("<fieldset lang=\"{0}\"><legend>{1}</legend>", locale.code(), locale.native_name()));
        for (name, label, multiline) in texts {
            let input_name = format!("translations.{}.{name}", locale.code());
            let value = translation_value(fields, name);
            let control = if *multiline {
                text_area(&page.t(label), &input_name, value, errors)
            } else {
                input(&page.t(label), &input_name, "text", value, errors)
            };
            out.push_str(&control);
        }
        out.push_str("</fieldset>");
    }
    out
}

fn progress_card(page: &Page<'_>, progress: &UniversityProgress) -> String {
    let mut card = format!(
        "<aside class=\"progress-card\"><h2>{}</h2><p class=\"total\">{total}%</p>\
         <progress max=\"100\" value=\"{total}\"></progress><ul>",
        page.t("University.progress"),
        total = progress.total_percent,
    );
    for (key, section) in progress.sections() {
        card.push_str(&format!(
            "<li><span>{}</span><span>{}</span><span>{}/{}%</span></li>",
            page.t(&format!("University.sections.{key}")),
            page.format(
                "University.fields",
                &[
                    ("filled", &section.filled_fields.to_string()),
                    ("total", &section.total_fields.to_string()),
                ]
            ),
            section.percent,
            section.max_percent,
        ));
    }
    card.push_str("</ul></aside>");
    card
}

fn opt(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

pub struct EditView<'a> {
    pub detail: &'a UniversityDetail,
    pub form: &'a UniversityEditForm,
    pub errors: &'a FieldErrors,
    pub notice: Option<(&'static str, String)>,
}

pub fn edit_university(page: &Page<'_>, view: &EditView<'_>) -> Html<String> {
    let detail = view.detail;
    let form = view.form;
    let errors = view.errors;
    let title = detail.display_name(page.locale);

    let mut body = format!(
        "<section class=\"university-edit\"><h1>{}</h1>",
        escape_html(&title)
    );
    if let Some((kind, text)) = &view.notice {
        body.push_str(&notice(kind, text));
    }
    body.push_str(&progress_card(page, &detail.progress));
    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\" novalidate><h2>{basic}</h2>{}{}{}{}{}{}",
        input(&page.t("University.photoUrl"), "photoUrl", "url", opt(&form.photo_url), errors),
        input(&page.t("University.websiteUrl"), "websiteUrl", "url", opt(&form.website_url), errors),
        input(&page.t("University.foundedYear"), "foundedYear", "number", opt(&form.founded_year), errors),
        input(&page.t("University.contactPhone"), "contactPhone", "tel", opt(&form.contact_phone), errors),
        input(&page.t("University.contactEmail"), "contactEmail", "email", opt(&form.contact_email), errors),
        translation_fieldsets(page, EDIT_TEXTS, errors, |l| form.translation(l)),
        action = page.href(&format!("/universities/{}/edit", detail.id)),
        basic = page.t("University.basicInfo"),
    ));
    body.push_str(&format!(
        "<button type=\"submit\">{}</button></form><p class=\"meta\">{}: {}</p></section>",
        page.t("University.save"),
        page.t("Dashboard.updated"),
        format_date(detail.updated_at.or(detail.created_at)),
    ));
    page.document(&title, &body)
}

pub struct CreateView<'a> {
    pub form: &'a CreateUniversityForm,
    pub errors: &'a FieldErrors,
    pub notice: Option<(&'static str, String)>,
}

pub fn new_university(page: &Page<'_>, view: &CreateView<'_>) -> Html<String> {
    let form = view.form;
    let errors = view.errors;
    let mut body = format!("<section><h1>{}</h1>", page.t("University.createTitle"));
    if let Some((kind, text)) = &view.notice {
        body.push_str(&notice(kind, text));
    }
    body.push_str(&format!(
        "<form method=\"post\" action=\"{action}\" novalidate>{}{}{}{}{}{}\
         <button type=\"submit\">{submit}</button></form></section>",
        input(&page.t("University.slug"), "slug", "text", &form.slug, errors),
        input(&page.t("University.websiteUrl"), "websiteUrl", "url", opt(&form.website_url), errors),
        input(&page.t("University.foundedYear"), "foundedYear", "number", opt(&form.founded_year), errors),
        input(&page.t("University.contactPhone"), "contactPhone", "tel", opt(&form.contact_phone), errors),
        input(&page.t("University.contactEmail"), "contactEmail", "email", opt(&form.contact_email), errors),
        translation_fieldsets(page, CREATE_TEXTS, errors, |l| form.translation(l)),
        action = page.href("/universities/new"),
        submit = page.t("University.create"),
    ));
    page.document(&page.text("University.createTitle"), &body)
}
