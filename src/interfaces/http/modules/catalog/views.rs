use axum::response::Html;

use crate::application::DataTableParams;
use crate::domain::{CompareList, University};
use crate::interfaces::http::render::{escape_html, notice, pagination, Page};
use crate::shared::Paginated;

/// Add/remove button posting to the compare toggle.
pub fn compare_button(page: &Page<'_>, compare: &CompareList, id: i64, return_to: &str) -> String {
    let (label, disabled) = if compare.contains(id) {
        (page.t("Universities.removeFromCompare"), "")
    } else if compare.can_add_more() {
        (page.t("Universities.addToCompare"), "")
    } else {
        (page.t("Universities.compareFull"), " disabled")
    };
    format!(
        "<form method=\"post\" action=\"{}\" class=\"inline\">\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\
         <input type=\"hidden\" name=\"returnTo\" value=\"{}\">\
         <button type=\"submit\"{disabled}>{label}</button></form>",
        page.href("/compare/toggle"),
        escape_html(return_to),
    )
}

fn card(page: &Page<'_>, university: &University, compare: &CompareList, return_to: &str) -> String {
    let translation = university.translation(page.locale);
    let city = translation
        .and_then(|t| t.city.as_deref())
        .map(|c| format!("<p class=\"city\">{}</p>", escape_html(c)))
        .unwrap_or_default();
    let summary = translation
        .and_then(|t| t.short_description.as_deref())
        .map(|d| format!("<p>{}</p>", escape_html(d)))
        .unwrap_or_default();
    let detail = page.href(&format!("/universities/{}", university.id));
    format!(
        "<article class=\"card\"><img src=\"{img}\" alt=\"\" loading=\"lazy\">\
         <h3><a href=\"{detail}\">{name}</a></h3>{city}{summary}\
         <p class=\"meta\">{views_label}: {views}</p>\
         <a href=\"{detail}\">{details}</a>{compare}</article>",
        img = page.image(university.photo_url.as_deref()),
        name = escape_html(&university.display_name(page.locale)),
        views_label = page.t("Universities.views"),
        views = university.view_count,
        details = page.t("Universities.details"),
        compare = compare_button(page, compare, university.id, return_to),
    )
}

pub fn home(page: &Page<'_>, popular: &[University], compare: &CompareList) -> Html<String> {
    let mut body = format!(
        "<section class=\"hero\"><h1>{}</h1><p>{}</p><a class=\"button\" href=\"{}\">{}</a></section>",
        page.t("Home.title"),
        page.t("Home.subtitle"),
        page.href("/universities"),
        page.t("Home.cta"),
    );
    if !popular.is_empty() {
        body.push_str(&format!("<section><h2>{}</h2><div class=\"grid\">", page.t("Home.popular")));
        for university in popular {
            body.push_str(&card(page, university, compare, &page.path));
        }
        body.push_str("</div></section>");
    }
    page.document("", &body)
}

pub fn list(
    page: &Page<'_>,
    params: &DataTableParams,
    result: &Paginated<University>,
    compare: &CompareList,
) -> Html<String> {
    let return_to = params.href(&page.path);
    let mut body = format!(
        "<section><h1>{}</h1>\
         <form method=\"get\" action=\"{}\" class=\"search\" role=\"search\">\
         <input type=\"search\" name=\"search\" value=\"{}\" placeholder=\"{}\">\
         <button type=\"submit\">{}</button></form>",
        page.t("Universities.title"),
        escape_html(&page.path),
        escape_html(params.search()),
        page.t("Universities.search"),
        page.t("Universities.searchButton"),
    );
    if result.data.is_empty() {
        body.push_str(&notice("info", &page.text("Universities.empty")));
    } else {
        body.push_str("<div class=\"grid\">");
        for university in &result.data {
            body.push_str(&card(page, university, compare, &return_to));
        }
        body.push_str("</div>");
    }
    body.push_str(&pagination(page, "Universities", params, &result.meta));
    body.push_str("</section>");
    page.document(&page.text("Universities.title"), &body)
}

fn external_link(url: Option<&str>, label: &str) -> String {
    match url.filter(|u| u.starts_with("http://") || u.starts_with("https://")) {
        Some(u) => format!(
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{label}</a>",
            escape_html(u)
        ),
        None => String::new(),
    }
}

pub fn detail(page: &Page<'_>, university: &University, compare: &CompareList) -> Html<String> {
    let name = university.display_name(page.locale);
    let translation = university.translation(page.locale);
    let description = translation
        .and_then(|t| t.description.as_deref().or(t.short_description.as_deref()))
        .map(|d| format!("<p class=\"description\">{}</p>", escape_html(d)))
        .unwrap_or_default();

    let mut facts = String::new();
    let mut fact = |label: String, value: String| {
        facts.push_str(&format!("<dt>{label}</dt><dd>{value}</dd>"));
    };
    if let Some(city) = translation.and_then(|t| t.city.as_deref()) {
        fact(page.t("Universities.city"), escape_html(city));
    }
    if let Some(year) = university.founded_year {
        fact(page.t("Universities.founded"), year.to_string());
    }
    if let Some(phone) = university.contact_phone.as_deref() {
        fact(page.t("Universities.phone"), escape_html(phone));
    }
    if let Some(email) = university.contact_email.as_deref() {
        fact(page.t("Universities.email"), escape_html(email));
    }
    fact(page.t("Universities.views"), university.view_count.to_string());

    let body = format!(
        "<article class=\"detail\"><img src=\"{img}\" alt=\"{alt}\">\
         <h1>{title}</h1>{description}\
         <h2>{contacts}</h2><dl>{facts}</dl>\
         <p class=\"links\">{website}{tour}</p>{compare}</article>",
        img = page.image(university.photo_url.as_deref()),
        alt = escape_html(&name),
        title = escape_html(&name),
        contacts = page.t("Universities.contacts"),
        website = external_link(university.website_url.as_deref(), &page.t("Universities.website")),
        tour = external_link(university.virtual_tour_url.as_deref(), &page.t("Universities.virtualTour")),
        compare = compare_button(page, compare, university.id, &page.path),
    );
    page.document(&name, &body)
}

pub fn compare(page: &Page<'_>, universities: &[University]) -> Html<String> {
    let mut body = format!("<section><h1>{}</h1>", page.t("Compare.title"));
    if universities.is_empty() {
        body.push_str(&notice("info", &page.text("Compare.empty")));
        body.push_str(&format!(
            "<a class=\"button\" href=\"{}\">{}</a></section>",
            page.href("/universities"),
            page.t("Home.cta")
        ));
        return page.document(&page.text("Compare.title"), &body);
    }

    let mut head = format!("<th>{}</th>", page.t("Compare.name"));
    let mut cities = format!("<th>{}</th>", page.t("Universities.city"));
    let mut founded = format!("<th>{}</th>", page.t("Universities.founded"));
    let mut views = format!("<th>{}</th>", page.t("Universities.views"));
    let mut actions = "<th></th>".to_string();
    for university in universities {
        let translation = university.translation(page.locale);
        head.push_str(&format!(
            "<th><img src=\"{}\" alt=\"\"><a href=\"{}\">{}</a></th>",
            page.image(university.photo_url.as_deref()),
            page.href(&format!("/universities/{}", university.id)),
            escape_html(&university.display_name(page.locale)),
        ));
        cities.push_str(&format!(
            "<td>{}</td>",
            escape_html(translation.and_then(|t| t.city.as_deref()).unwrap_or("—"))
        ));
        founded.push_str(&format!(
            "<td>{}</td>",
            university.founded_year.map(|y| y.to_string()).unwrap_or_else(|| "—".into())
        ));
        views.push_str(&format!("<td>{}</td>", university.view_count));
        actions.push_str(&format!(
            "<td><form method=\"post\" action=\"{}\"><input type=\"hidden\" name=\"id\" value=\"{}\">\
             <input type=\"hidden\" name=\"returnTo\" value=\"{}\">\
             <button type=\"submit\">{}</button></form></td>",
            page.href("/compare/toggle"),
            university.id,
            escape_html(&page.path),
            page.t("Compare.remove"),
        ));
    }
    body.push_str(&format!(
        "<table class=\"compare\"><thead><tr>{head}</tr></thead><tbody>\
         <tr>{cities}</tr><tr>{founded}</tr><tr>{views}</tr><tr>{actions}</tr></tbody></table>\
         <form method=\"post\" action=\"{}\"><button type=\"submit\">{}</button></form></section>",
        page.href("/compare/clear"),
        page.t("Compare.clear"),
    ));
    page.document(&page.text("Compare.title"), &body)
}
