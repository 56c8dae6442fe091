//! University create and edit forms of the admin site.
//!
//! Browsers post flat pairs; translation inputs are named
//! `translations.<locale>.<field>` and land under the same error paths.

use std::collections::BTreeMap;

use chrono::{Datelike, Utc};
use validator::Validate;

use crate::application::dto::{
    CreateUniversityRequest, CreateUniversityTranslation, UpdateUniversityRequest,
    UpdateUniversityTranslation,
};
use crate::application::identity::FormSchema;
use crate::domain::{Locale, UniversityDetail};
use crate::shared::FieldErrors;

pub const NAME_REQUIRED: &str = "at least one translation with a name is required";

const EARLIEST_FOUNDED_YEAR: i32 = 1000;

/// Editable texts of one locale. Empty strings mean "not filled".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationFields {
    pub name: String,
    pub city: String,
    pub short_description: String,
    pub description: String,
    pub goal: String,
    pub address: String,
    pub history_text: String,
}

impl TranslationFields {
    fn set(&mut self, field: &str, value: String) {
        let slot = match field {
            "name" => &mut self.name,
            "city" => &mut self.city,
            "shortDescription" => &mut self.short_description,
            "description" => &mut self.description,
            "goal" => &mut self.goal,
            "address" => &mut self.address,
            "historyText" => &mut self.history_text,
            _ => return,
        };
        *slot = value;
    }

    fn trim(&mut self) {
        for value in [
            &mut self.name,
            &mut self.city,
            &mut self.short_description,
            &mut self.description,
            &mut self.goal,
            &mut self.address,
            &mut self.history_text,
        ] {
            *value = value.trim().to_string();
        }
    }

    fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct UniversityEditForm {
    #[validate(url(message = "enter a valid URL"))]
    pub photo_url: Option<String>,
    #[validate(url(message = "enter a valid URL"))]
    pub website_url: Option<String>,
    pub founded_year: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(email(message = "enter a valid email"))]
    pub contact_email: Option<String>,
    pub translations: BTreeMap<Locale, TranslationFields>,
}

impl UniversityEditForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "photoUrl" => form.photo_url = Some(value),
                "websiteUrl" => form.website_url = Some(value),
                "foundedYear" => form.founded_year = Some(value),
                "contactPhone" => form.contact_phone = Some(value),
                "contactEmail" => form.contact_email = Some(value),
                _ => set_translation(&mut form.translations, &key, value),
            }
        }
        form
    }

    /// Current values of a university, for the initial edit page.
    pub fn from_detail(detail: &UniversityDetail) -> Self {
        let mut translations = BTreeMap::new();
        for locale in Locale::ALL {
            if let Some(t) = detail.translation(locale) {
                let text = |v: &Option<String>| v.clone().unwrap_or_default();
                translations.insert(
                    locale,
                    TranslationFields {
                        name: t.name.clone(),
                        city: text(&t.city),
                        short_description: text(&t.short_description),
                        description: text(&t.description),
                        goal: text(&t.goal),
                        address: text(&t.address),
                        history_text: text(&t.history_text),
                    },
                );
            }
        }
        Self {
            photo_url: detail.photo_url.clone(),
            website_url: detail.website_url.clone(),
            founded_year: detail.founded_year.map(|y| y.to_string()),
            contact_phone: detail.contact_phone.clone(),
            contact_email: detail.contact_email.clone(),
            translations,
        }
    }

    pub fn translation(&self, locale: Locale) -> Option<&TranslationFields> {
        self.translations.get(&locale)
    }
}

impl FormSchema for UniversityEditForm {
    fn normalize(&mut self) {
        for value in [
            &mut self.photo_url,
            &mut self.website_url,
            &mut self.founded_year,
            &mut self.contact_phone,
            &mut self.contact_email,
        ] {
            blank_to_none(value);
        }
        for fields in self.translations.values_mut() {
            fields.trim();
        }
        self.translations.retain(|_, fields| !fields.is_blank());
    }

    fn refine(&self, errors: &mut FieldErrors) {
        check_year(self.founded_year.as_deref(), errors);
        check_translations(&self.translations, errors);
    }
}

impl From<UniversityEditForm> for UpdateUniversityRequest {
    fn from(form: UniversityEditForm) -> Self {
        let translations = form
            .translations
            .into_iter()
            .map(|(locale, t)| {
                (
                    locale.code().to_string(),
                    UpdateUniversityTranslation {
                        name: t.name,
                        city: Some(t.city),
                        short_description: Some(t.short_description),
                        description: Some(t.description),
                        goal: Some(t.goal),
                        address: Some(t.address),
                        history_text: Some(t.history_text),
                    },
                )
            })
            .collect();
        Self {
            photo_url: form.photo_url,
            website_url: form.website_url,
            founded_year: parse_year(form.founded_year.as_deref()),
            contact_phone: form.contact_phone,
            contact_email: form.contact_email,
            translations,
        }
    }
}

#[derive(Debug, Clone, Default, Validate)]
pub struct CreateUniversityForm {
    #[validate(length(min = 2, max = 100, message = "slug must be 2 to 100 characters"))]
    pub slug: String,
    #[validate(url(message = "enter a valid URL"))]
    pub website_url: Option<String>,
    pub founded_year: Option<String>,
    pub contact_phone: Option<String>,
    #[validate(email(message = "enter a valid email"))]
    pub contact_email: Option<String>,
    pub translations: BTreeMap<Locale, TranslationFields>,
}

impl CreateUniversityForm {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "slug" => form.slug = value,
                "websiteUrl" => form.website_url = Some(value),
                "foundedYear" => form.founded_year = Some(value),
                "contactPhone" => form.contact_phone = Some(value),
                "contactEmail" => form.contact_email = Some(value),
                _ => set_translation(&mut form.translations, &key, value),
            }
        }
        form
    }

    pub fn translation(&self, locale: Locale) -> Option<&TranslationFields> {
        self.translations.get(&locale)
    }
}

impl FormSchema for CreateUniversityForm {
    fn normalize(&mut self) {
        self.slug = self.slug.trim().to_lowercase();
        for value in [
            &mut self.website_url,
            &mut self.founded_year,
            &mut self.contact_phone,
            &mut self.contact_email,
        ] {
            blank_to_none(value);
        }
        for fields in self.translations.values_mut() {
            fields.trim();
        }
        self.translations.retain(|_, fields| !fields.is_blank());
    }

    fn refine(&self, errors: &mut FieldErrors) {
        let slug_ok = self
            .slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !slug_ok {
            errors.add("slug", "use latin letters, digits and hyphens");
        }
        check_year(self.founded_year.as_deref(), errors);
        check_translations(&self.translations, errors);
    }
}

impl From<CreateUniversityForm> for CreateUniversityRequest {
    fn from(form: CreateUniversityForm) -> Self {
        let filled = |v: String| Some(v).filter(|v| !v.is_empty());
        let translations = form
            .translations
            .into_iter()
            .map(|(locale, t)| {
                (
                    locale.code().to_string(),
                    CreateUniversityTranslation {
                        name: t.name,
                        description: filled(t.description),
                        city: filled(t.city),
                    },
                )
            })
            .collect();
        Self {
            slug: form.slug,
            website_url: form.website_url,
            founded_year: parse_year(form.founded_year.as_deref()),
            contact_phone: form.contact_phone,
            contact_email: form.contact_email,
            translations,
        }
    }
}

/// `translations.kk.name` -> `(Kk, "name")`. Unknown locales are dropped.
fn set_translation(translations: &mut BTreeMap<Locale, TranslationFields>, key: &str, value: String) {
    let mut parts = key.splitn(3, '.');
    let (Some("translations"), Some(code), Some(field)) = (parts.next(), parts.next(), parts.next())
    else {
        return;
    };
    if let Ok(locale) = code.parse::<Locale>() {
        translations.entry(locale).or_default().set(field, value);
    }
}

fn blank_to_none(value: &mut Option<String>) {
    *value = value
        .take()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
}

fn parse_year(text: Option<&str>) -> Option<i32> {
    text.and_then(|t| t.parse().ok())
}

fn check_year(text: Option<&str>, errors: &mut FieldErrors) {
    let Some(text) = text else { return };
    let valid = text
        .parse::<i32>()
        .is_ok_and(|y| (EARLIEST_FOUNDED_YEAR..=Utc::now().year()).contains(&y));
    if !valid {
        errors.add("foundedYear", "enter a valid year");
    }
}

fn check_translations(translations: &BTreeMap<Locale, TranslationFields>, errors: &mut FieldErrors) {
    if !translations.values().any(|t| !t.name.is_empty()) {
        errors.add("translations", NAME_REQUIRED);
    }
    for (locale, fields) in translations {
        let path = format!("translations.{}.name", locale.code());
        if fields.name.is_empty() {
            errors.add(path, "name is required when other texts are filled");
        } else if fields.name.chars().count() < 2 {
            errors.add(path, "name must be at least 2 characters");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn edit_form_reads_translation_inputs() {
        let form = UniversityEditForm::from_pairs(pairs(&[
            ("websiteUrl", " https://kaznu.kz "),
            ("foundedYear", "1934"),
            ("translations.ru.name", "КазНУ"),
            ("translations.ru.historyText", "История"),
            ("translations.en.name", ""),
            ("translations.de.name", "Uni"),
            ("translations.kk", "broken"),
        ]))
        .check()
        .unwrap();

        assert_eq!(form.translations.len(), 1);
        let request = UpdateUniversityRequest::from(form);
        assert_eq!(request.website_url.as_deref(), Some("https://kaznu.kz"));
        assert_eq!(request.founded_year, Some(1934));
        assert_eq!(request.photo_url, None);
        assert_eq!(request.translations["ru"].history_text.as_deref(), Some("История"));
        assert_eq!(request.translations["ru"].goal.as_deref(), Some(""));
    }

    #[test]
    fn untouched_lists_and_photo_stay_out_of_the_body() {
        let form = UniversityEditForm::from_pairs(pairs(&[("translations.kk.name", "ЕҰУ")]))
            .check()
            .unwrap();
        let body = serde_json::to_value(UpdateUniversityRequest::from(form)).unwrap();
        assert!(body.get("photoUrl").is_none());
        assert!(body.get("faculties").is_none());
        assert_eq!(body["translations"]["kk"]["name"], "ЕҰУ");
    }

    #[test]
    fn edit_form_needs_a_named_translation() {
        let errors = UniversityEditForm::from_pairs(pairs(&[
            ("contactEmail", "not-an-email"),
            ("foundedYear", "3024"),
            ("translations.en.city", "Astana"),
        ]))
        .check()
        .unwrap_err();

        assert_eq!(errors.first("translations"), Some(NAME_REQUIRED));
        assert!(errors.contains("translations.en.name"));
        assert!(errors.contains("contactEmail"));
        assert!(errors.contains("foundedYear"));
    }

    #[test]
    fn create_form_checks_slug() {
        let errors = CreateUniversityForm::from_pairs(pairs(&[
            ("slug", "Kaz NU"),
            ("translations.ru.name", "КазНУ"),
        ]))
        .check()
        .unwrap_err();
        assert!(errors.contains("slug"));

        let errors = CreateUniversityForm::from_pairs(pairs(&[("translations.ru.name", "КазНУ")]))
            .check()
            .unwrap_err();
        assert!(errors.contains("slug"));
    }

    #[test]
    fn create_form_sends_only_filled_texts() {
        let form = CreateUniversityForm::from_pairs(pairs(&[
            ("slug", " KazNU-1 "),
            ("websiteUrl", ""),
            ("translations.ru.name", "КазНУ"),
            ("translations.ru.city", "Алматы"),
            ("translations.ru.goal", "ignored on create"),
        ]))
        .check()
        .unwrap();
        assert_eq!(form.slug, "kaznu-1");

        let body = serde_json::to_value(CreateUniversityRequest::from(form)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "slug": "kaznu-1",
                "translations": {"ru": {"name": "КазНУ", "city": "Алматы"}}
            })
        );
    }

    #[test]
    fn detail_prefills_edit_form() {
        let detail: UniversityDetail = serde_json::from_value(serde_json::json!({
            "id": 3,
            "foundedYear": 1934,
            "translations": {"ru": {"name": "КазНУ", "address": "аль-Фараби 71"}}
        }))
        .unwrap();
        let form = UniversityEditForm::from_detail(&detail);
        assert_eq!(form.founded_year.as_deref(), Some("1934"));
        let ru = form.translation(Locale::Ru).unwrap();
        assert_eq!(ru.address, "аль-Фараби 71");
        assert_eq!(ru.goal, "");
        assert!(form.translation(Locale::En).is_none());
    }
}
