use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::locale::Locale;

/// Full text block of one locale, as edited on the admin site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniversityDetailTranslation {
    pub name: String,
    pub short_description: Option<String>,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub history_text: Option<String>,
    pub is_complete: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionProgress {
    pub name: String,
    pub percent: u8,
    pub max_percent: u8,
    pub filled_fields: u32,
    pub total_fields: u32,
}

/// Fill rate of the university profile, broken down by section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UniversityProgress {
    pub total_percent: u8,
    pub basic_info: SectionProgress,
    pub description: SectionProgress,
    pub leadership: SectionProgress,
    pub achievements: SectionProgress,
    pub faculties: SectionProgress,
    pub admission_rules: SectionProgress,
    pub tuition: SectionProgress,
    pub international: SectionProgress,
}

impl UniversityProgress {
    /// Sections in display order, keyed by their wire names.
    pub fn sections(&self) -> [(&'static str, &SectionProgress); 8] {
        [
            ("basicInfo", &self.basic_info),
            ("description", &self.description),
            ("leadership", &self.leadership),
            ("achievements", &self.achievements),
            ("faculties", &self.faculties),
            ("admissionRules", &self.admission_rules),
            ("tuition", &self.tuition),
            ("international", &self.international),
        ]
    }
}

/// `GET /universities/{id}/detail`. Nested lists (faculties, tuition and
/// the like) are not edited here and are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityDetail {
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
    pub translations: HashMap<String, UniversityDetailTranslation>,
    #[serde(default)]
    pub progress: UniversityProgress,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

impl UniversityDetail {
    pub fn translation(&self, locale: Locale) -> Option<&UniversityDetailTranslation> {
        self.translations.get(locale.code())
    }

    pub fn display_name(&self, locale: Locale) -> String {
        self.translation(locale)
            .or_else(|| self.translations.get(Locale::Ru.code()))
            .map(|t| t.name.clone())
            .filter(|n| !n.is_empty())
            .or_else(|| self.slug.clone())
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}
