//! Message bundles per site and locale.
//!
//! Bundles are nested JSON objects addressed with dotted keys
//! (`Header.login`). They are compiled in; a directory laid out as
//! `<dir>/<site>/<locale>.json` replaces individual bundles at startup.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult, Locale, SiteKind};

fn embedded_source(site: SiteKind, locale: Locale) -> &'static str {
    match (site, locale) {
        (SiteKind::Admin, Locale::Ru) => include_str!("../../../messages/admin/ru.json"),
        (SiteKind::Admin, Locale::Kk) => include_str!("../../../messages/admin/kk.json"),
        (SiteKind::Admin, Locale::En) => include_str!("../../../messages/admin/en.json"),
        (SiteKind::Client, Locale::Ru) => include_str!("../../../messages/client/ru.json"),
        (SiteKind::Client, Locale::Kk) => include_str!("../../../messages/client/kk.json"),
        (SiteKind::Client, Locale::En) => include_str!("../../../messages/client/en.json"),
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    bundles: HashMap<Locale, Value>,
}

impl Catalog {
    pub fn embedded(site: SiteKind) -> DomainResult<Self> {
        let mut bundles = HashMap::new();
        for locale in Locale::ALL {
            bundles.insert(locale, parse_bundle(embedded_source(site, locale))?);
        }
        Ok(Self { bundles })
    }

    /// Embedded bundles, with files from `dir` taking precedence.
    pub fn load(site: SiteKind, dir: Option<&Path>) -> DomainResult<Self> {
        let mut catalog = Self::embedded(site)?;
        let Some(dir) = dir else {
            return Ok(catalog);
        };

        for locale in Locale::ALL {
            let path = dir.join(site.as_str()).join(format!("{}.json", locale.code()));
            match std::fs::read_to_string(&path) {
                Ok(raw) => {
                    catalog.bundles.insert(locale, parse_bundle(&raw)?);
                    info!(path = %path.display(), "loaded message bundle");
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(DomainError::Storage(format!(
                        "read {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }
        Ok(catalog)
    }

    pub fn messages(&self, locale: Locale) -> Messages<'_> {
        Messages {
            locale,
            bundle: self.bundles.get(&locale),
        }
    }
}

fn parse_bundle(raw: &str) -> DomainResult<Value> {
    let value: Value = serde_json::from_str(raw)?;
    if !value.is_object() {
        return Err(DomainError::Storage("message bundle must be a JSON object".into()));
    }
    Ok(value)
}

/// Messages of one locale.
#[derive(Debug, Clone, Copy)]
pub struct Messages<'a> {
    locale: Locale,
    bundle: Option<&'a Value>,
}

impl<'a> Messages<'a> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    fn lookup(&self, key: &str) -> Option<&'a str> {
        key.split('.')
            .try_fold(self.bundle?, |node, part| node.get(part))?
            .as_str()
    }

    /// Translated text, or the key itself when missing.
    pub fn t(&self, key: &str) -> String {
        match self.lookup(key) {
            Some(text) => text.to_string(),
            None => {
                warn!(locale = %self.locale, key, "missing translation");
                key.to_string()
            }
        }
    }

    /// Like [`t`](Self::t) with `{name}` placeholders filled in.
    pub fn format(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter().fold(self.t(key), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_keys(value: &Value, prefix: &str, out: &mut Vec<String>) {
        match value {
            Value::Object(map) => {
                for (k, v) in map {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    leaf_keys(v, &key, out);
                }
            }
            _ => out.push(prefix.to_string()),
        }
    }

    #[test]
    fn every_locale_has_the_same_keys() {
        for site in [SiteKind::Admin, SiteKind::Client] {
            let catalog = Catalog::embedded(site).unwrap();
            let mut reference = Vec::new();
            leaf_keys(&catalog.bundles[&Locale::Ru], "", &mut reference);
            reference.sort();
            for locale in [Locale::Kk, Locale::En] {
                let mut keys = Vec::new();
                leaf_keys(&catalog.bundles[&locale], "", &mut keys);
                keys.sort();
                assert_eq!(keys, reference, "{site}/{locale}");
            }
        }
    }

    #[test]
    fn dotted_lookup_and_missing_keys() {
        let catalog = Catalog::embedded(SiteKind::Client).unwrap();
        let en = catalog.messages(Locale::En);
        assert_eq!(en.t("Header.login"), "Sign in");
        assert_eq!(en.t("Header.nope"), "Header.nope");
        assert_eq!(en.t("Header"), "Header");
    }

    #[test]
    fn placeholders_are_filled() {
        let catalog = Catalog::embedded(SiteKind::Client).unwrap();
        let text = catalog
            .messages(Locale::En)
            .format("Universities.page", &[("page", "2"), ("total", "5")]);
        assert_eq!(text, "Page 2 of 5");
    }

    #[test]
    fn directory_overrides_single_bundle() {
        let dir = std::env::temp_dir().join(format!("oquga-messages-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(dir.join("client")).unwrap();
        std::fs::write(dir.join("client/en.json"), r#"{"Header":{"login":"Log in"}}"#).unwrap();

        let catalog = Catalog::load(SiteKind::Client, Some(&dir)).unwrap();
        assert_eq!(catalog.messages(Locale::En).t("Header.login"), "Log in");
        assert_eq!(catalog.messages(Locale::Ru).t("Header.login"), "Войти");

        let _ = std::fs::remove_dir_all(dir);
    }
}
