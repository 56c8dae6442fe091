//! Remote image allow-list.
//!
//! Patterns look like `https://s3.oquga.kz`, `https://*.amazonaws.com` or
//! `http://localhost:9000`. In the host part `*` matches one label and `**`
//! matches one or more. The scheme and port are optional; when given they
//! must match exactly.

use url::Url;

pub const PLACEHOLDER_IMAGE: &str = "/static/dummy-poster.svg";

#[derive(Debug, Clone, PartialEq, Eq)]
struct HostPattern {
    scheme: Option<String>,
    labels: Vec<String>,
    port: Option<u16>,
}

impl HostPattern {
    fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (scheme, rest) = match raw.split_once("://") {
            Some((scheme, rest)) => (Some(scheme.to_ascii_lowercase()), rest),
            None => (None, raw),
        };
        let authority = rest.split('/').next().unwrap_or(rest);
        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port.parse().ok()?)),
            None => (authority, None),
        };
        if host.is_empty() {
            return None;
        }
        Some(Self {
            scheme,
            labels: host.to_ascii_lowercase().split('.').map(str::to_string).collect(),
            port,
        })
    }

    fn matches(&self, url: &Url) -> bool {
        if self.scheme.as_deref().is_some_and(|s| s != url.scheme()) {
            return false;
        }
        if self.port.is_some() && self.port != url.port() {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_ascii_lowercase();
        let labels: Vec<&str> = host.split('.').collect();
        let pattern: Vec<&str> = self.labels.iter().map(String::as_str).collect();
        labels_match(&pattern, &labels)
    }
}

fn labels_match(pattern: &[&str], host: &[&str]) -> bool {
    match (pattern.split_first(), host.split_first()) {
        (None, None) => true,
        (Some((&"**", rest)), Some(_)) => {
            (1..=host.len()).any(|taken| labels_match(rest, &host[taken..]))
        }
        (Some((&"*", rest)), Some((_, host_rest))) => labels_match(rest, host_rest),
        (Some((label, rest)), Some((h, host_rest))) => label == h && labels_match(rest, host_rest),
        _ => false,
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImagePolicy {
    patterns: Vec<HostPattern>,
}

impl ImagePolicy {
    /// Unparseable patterns are skipped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .filter_map(|p| HostPattern::parse(p.as_ref()))
                .collect(),
        }
    }

    pub fn is_allowed(&self, url: &str) -> bool {
        Url::parse(url).is_ok_and(|parsed| self.patterns.iter().any(|p| p.matches(&parsed)))
    }

    /// URL to put in an `<img>`: local paths and allowed hosts pass,
    /// anything else becomes the placeholder.
    pub fn resolve(&self, url: Option<&str>) -> String {
        match url.map(str::trim) {
            Some(u) if u.starts_with('/') && !u.starts_with("//") => u.to_string(),
            Some(u) if !u.is_empty() && self.is_allowed(u) => u.to_string(),
            _ => PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ImagePolicy {
        ImagePolicy::new([
            "https://s3.oquga.kz",
            "https://*.amazonaws.com",
            "http://localhost:9000",
        ])
    }

    #[test]
    fn exact_and_single_label_wildcards() {
        let p = policy();
        assert!(p.is_allowed("https://s3.oquga.kz/u/1.png"));
        assert!(p.is_allowed("https://bucket.amazonaws.com/a.jpg"));
        assert!(!p.is_allowed("https://a.b.amazonaws.com/a.jpg"));
        assert!(!p.is_allowed("http://s3.oquga.kz/u/1.png"));
        assert!(p.is_allowed("http://localhost:9000/x.png"));
        assert!(!p.is_allowed("http://localhost:9001/x.png"));
    }

    #[test]
    fn double_star_spans_labels() {
        let p = ImagePolicy::new(["https://**"]);
        assert!(p.is_allowed("https://cdn.images.example.org/p.webp"));
        assert!(!p.is_allowed("http://example.org/p.webp"));

        let p = ImagePolicy::new(["https://**.oquga.kz"]);
        assert!(p.is_allowed("https://a.b.oquga.kz/p.png"));
        assert!(!p.is_allowed("https://oquga.kz/p.png"));
    }

    #[test]
    fn resolve_falls_back_to_placeholder() {
        let p = policy();
        assert_eq!(p.resolve(None), PLACEHOLDER_IMAGE);
        assert_eq!(p.resolve(Some("")), PLACEHOLDER_IMAGE);
        assert_eq!(p.resolve(Some("https://evil.test/x.png")), PLACEHOLDER_IMAGE);
        assert_eq!(p.resolve(Some("/static/logo.png")), "/static/logo.png");
        assert_eq!(p.resolve(Some("//evil.test/x.png")), PLACEHOLDER_IMAGE);
        assert_eq!(
            p.resolve(Some("https://s3.oquga.kz/a.png")),
            "https://s3.oquga.kz/a.png"
        );
    }
}
