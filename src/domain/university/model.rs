use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::locale::Locale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityTranslation {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
}

/// University card/detail data. Texts are keyed by locale code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct University {
    pub id: i64,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default)]
    pub virtual_tour_url: Option<String>,
    #[serde(default)]
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub contact_email: Option<String>,
    #[serde(default)]
    pub view_count: i64,
    #[serde(default)]
    pub translations: HashMap<String, UniversityTranslation>,
    #[serde(default)]
    pub progress_percent: u8,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl University {
    /// Text in `locale`, falling back to Russian and then to any translation.
    pub fn translation(&self, locale: Locale) -> Option<&UniversityTranslation> {
        self.translations
            .get(locale.code())
            .or_else(|| self.translations.get(Locale::Ru.code()))
            .or_else(|| self.translations.values().next())
    }

    pub fn display_name(&self, locale: Locale) -> String {
        self.translation(locale)
            .map(|t| t.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| self.slug.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }

    pub fn is_complete(&self) -> bool {
        self.progress_percent >= 100
    }
}

/// Administrator bound to a single university (admin site "users").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityAdmin {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub university_id: Option<i64>,
    #[serde(default)]
    pub university_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
}
