//! Supported UI locales and locale-prefixed paths.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    Kk,
    En,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::Ru, Locale::Kk, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ru => "ru",
            Locale::Kk => "kk",
            Locale::En => "en",
        }
    }

    /// Label shown in the language switcher.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Ru => "Русский",
            Locale::Kk => "Қазақша",
            Locale::En => "English",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Locale::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| UnsupportedLocale(s.to_string()))
    }
}

/// Split the locale prefix off a request path.
///
/// `/kk/profile` gives `(Some(Kk), "/profile")`, `/kk` gives `(Some(Kk), "/")`
/// and a path whose first segment is not a supported locale is returned as is.
pub fn split_locale(path: &str) -> (Option<Locale>, &str) {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (first, rest) = match trimmed.find('/') {
        Some(idx) => (&trimmed[..idx], &trimmed[idx..]),
        None => (trimmed, ""),
    };

    match first.parse::<Locale>() {
        Ok(locale) if rest.is_empty() => (Some(locale), "/"),
        Ok(locale) => (Some(locale), rest),
        Err(_) => (None, path),
    }
}

/// Prefix a locale-free path with `/{locale}`.
pub fn localized_path(locale: Locale, path: &str) -> String {
    match path {
        "" | "/" => format!("/{}", locale.code()),
        p if p.starts_with('/') => format!("/{}{}", locale.code(), p),
        p => format!("/{}/{}", locale.code(), p),
    }
}

/// Same page in another language.
pub fn switch_locale_path(path: &str, to: Locale) -> String {
    let (_, rest) = split_locale(path);
    localized_path(to, rest)
}

/// Pick a locale for a request that did not name one: the stored preference
/// first, then `Accept-Language` by descending quality, then `fallback`.
pub fn negotiate(
    preferred: Option<&str>,
    accept_language: Option<&str>,
    fallback: Locale,
) -> Locale {
    if let Some(locale) = preferred.and_then(|p| p.trim().parse().ok()) {
        return locale;
    }

    let Some(header) = accept_language else {
        return fallback;
    };

    let mut ranked: Vec<(f32, &str)> = header
        .split(',')
        .filter_map(|part| {
            let mut pieces = part.trim().split(';');
            let tag = pieces.next()?.trim();
            if tag.is_empty() {
                return None;
            }
            let quality = pieces
                .find_map(|p| p.trim().strip_prefix("q="))
                .and_then(|q| q.parse::<f32>().ok())
                .unwrap_or(1.0);
            Some((quality, tag))
        })
        .collect();
    ranked.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .filter(|(q, _)| *q > 0.0)
        .find_map(|(_, tag)| {
            let primary = tag.split('-').next().unwrap_or(tag).to_ascii_lowercase();
            primary.parse().ok()
        })
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_supported_locale_splits_off() {
        for locale in Locale::ALL {
            let path = format!("/{}/universities/12", locale.code());
            assert_eq!(split_locale(&path), (Some(locale), "/universities/12"));
            assert_eq!(split_locale(&format!("/{}", locale)), (Some(locale), "/"));
        }
    }

    #[test]
    fn unsupported_segment_is_left_alone() {
        assert_eq!(split_locale("/de/profile"), (None, "/de/profile"));
        assert_eq!(split_locale("/profile"), (None, "/profile"));
        assert_eq!(split_locale("/"), (None, "/"));
        assert!("RU".parse::<Locale>().is_err());
    }

    #[test]
    fn switching_keeps_the_rest_of_the_path() {
        assert_eq!(switch_locale_path("/ru/universities", Locale::En), "/en/universities");
        assert_eq!(switch_locale_path("/kk", Locale::Ru), "/ru");
        assert_eq!(switch_locale_path("/profile", Locale::Kk), "/kk/profile");
    }

    #[test]
    fn negotiation_prefers_cookie_then_header() {
        assert_eq!(negotiate(Some("en"), Some("kk"), Locale::Ru), Locale::En);
        assert_eq!(negotiate(Some("xx"), Some("kk-KZ,ru;q=0.5"), Locale::Ru), Locale::Kk);
        assert_eq!(
            negotiate(None, Some("de-DE,en;q=0.7,ru;q=0.9"), Locale::Kk),
            Locale::Ru
        );
        assert_eq!(negotiate(None, Some("de,fr;q=0.8"), Locale::En), Locale::En);
        assert_eq!(negotiate(None, None, Locale::Ru), Locale::Ru);
    }
}
