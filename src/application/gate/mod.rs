//! Auth gate: decides, before any page renders, whether a request passes
//! or is redirected. Pure and stateless; the HTTP middleware feeds it the
//! request path and the raw auth cookie.

use url::form_urlencoded;

use crate::domain::{localized_path, session_from_cookie, split_locale, Locale, RouteClass, SiteKind};

/// Path prefixes never gated.
const BYPASS_PREFIXES: &[&str] = &["/api", "/static", "/health"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    Pass,
    /// 307 to the given location.
    Redirect(String),
}

/// Static files and the JSON surface skip the gate.
pub fn is_bypassed(path: &str) -> bool {
    let prefixed = BYPASS_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });
    prefixed
        || path
            .rsplit('/')
            .next()
            .is_some_and(|last| last.contains('.'))
}

/// Login page for `locale` that returns to `callback` afterwards.
pub fn login_redirect(locale: Locale, callback: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("callbackUrl", callback)
        .finish();
    format!("{}?{}", localized_path(locale, "/login"), query)
}

pub fn decide(
    site: SiteKind,
    default_locale: Locale,
    path: &str,
    auth_cookie: Option<&str>,
) -> GateDecision {
    if is_bypassed(path) {
        return GateDecision::Pass;
    }

    let (locale, bare) = match split_locale(path) {
        (Some(locale), rest) => (locale, rest),
        // The admin site only guards `/` and its localized pages; anything
        // else falls through to the not-found page.
        (None, _) if site == SiteKind::Admin && path != "/" => return GateDecision::Pass,
        (None, _) => (default_locale, path),
    };
    let authenticated = session_from_cookie(auth_cookie).is_valid();

    match site.route_policy().classify(bare) {
        RouteClass::Protected if !authenticated => {
            GateDecision::Redirect(login_redirect(locale, bare))
        }
        RouteClass::AuthOnly if authenticated => {
            GateDecision::Redirect(localized_path(locale, "/"))
        }
        _ => GateDecision::Pass,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str =
        r#"{"state":{"user":null,"accessToken":"abc","isAuthenticated":true},"version":0}"#;

    #[test]
    fn protected_path_without_cookie_goes_to_login() {
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/kk/profile", None),
            GateDecision::Redirect("/kk/login?callbackUrl=%2Fprofile".into())
        );
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/en/profile/security", Some("not-json")),
            GateDecision::Redirect("/en/login?callbackUrl=%2Fprofile%2Fsecurity".into())
        );
    }

    #[test]
    fn protected_path_with_valid_cookie_passes() {
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/ru/profile", Some(VALID)),
            GateDecision::Pass
        );
    }

    #[test]
    fn auth_only_page_sends_signed_in_users_home() {
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/en/login", Some(VALID)),
            GateDecision::Redirect("/en".into())
        );
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/ru/register", Some(VALID)),
            GateDecision::Redirect("/ru".into())
        );
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/ru/login", None),
            GateDecision::Pass
        );
    }

    #[test]
    fn token_less_cookie_is_rejected() {
        let cookie = r#"{"state":{"isAuthenticated":true,"accessToken":""},"version":0}"#;
        assert!(matches!(
            decide(SiteKind::Client, Locale::Ru, "/ru/dashboard", Some(cookie)),
            GateDecision::Redirect(_)
        ));
    }

    #[test]
    fn unknown_locale_uses_default_and_full_path() {
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/profile", None),
            GateDecision::Redirect("/ru/login?callbackUrl=%2Fprofile".into())
        );
    }

    #[test]
    fn admin_guards_every_page() {
        assert_eq!(
            decide(SiteKind::Admin, Locale::Ru, "/ru/users", None),
            GateDecision::Redirect("/ru/login?callbackUrl=%2Fusers".into())
        );
        assert_eq!(
            decide(SiteKind::Admin, Locale::Ru, "/ru", None),
            GateDecision::Redirect("/ru/login?callbackUrl=%2F".into())
        );
        assert_eq!(
            decide(SiteKind::Admin, Locale::Ru, "/ru/login", None),
            GateDecision::Pass
        );
        assert_eq!(
            decide(SiteKind::Admin, Locale::Ru, "/", None),
            GateDecision::Redirect("/ru/login?callbackUrl=%2F".into())
        );
    }

    #[test]
    fn admin_leaves_unsupported_locales_to_not_found() {
        for path in ["/de/universities", "/de", "/users"] {
            assert_eq!(decide(SiteKind::Admin, Locale::Ru, path, None), GateDecision::Pass, "{path}");
        }
    }

    #[test]
    fn client_prefixes_match_like_string_prefixes() {
        assert_eq!(
            decide(SiteKind::Client, Locale::Ru, "/ru/dashboard-old", None),
            GateDecision::Redirect("/ru/login?callbackUrl=%2Fdashboard-old".into())
        );
        assert_eq!(decide(SiteKind::Client, Locale::Ru, "/de/x", None), GateDecision::Pass);
    }

    #[test]
    fn assets_and_api_are_never_gated() {
        for path in ["/api/auth/login", "/static/logo.png", "/health", "/favicon.ico"] {
            assert_eq!(decide(SiteKind::Admin, Locale::Ru, path, None), GateDecision::Pass);
        }
        assert!(!is_bypassed("/apiary"));
    }
}
