//! The two deployable sites and their route policies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// Back-office dashboard for platform and university administrators.
    Admin,
    /// Public site for applicants.
    Client,
}

impl SiteKind {
    /// Name of the readable cookie mirroring the persisted auth store.
    pub fn auth_cookie_name(&self) -> &'static str {
        match self {
            SiteKind::Admin => "auth-storage",
            SiteKind::Client => "client-auth-storage",
        }
    }

    pub fn route_policy(&self) -> RoutePolicy {
        match self {
            SiteKind::Admin => RoutePolicy {
                protected_prefixes: &["/"],
                auth_only: &["/login"],
            },
            SiteKind::Client => RoutePolicy {
                protected_prefixes: &["/profile", "/settings", "/dashboard"],
                auth_only: &["/login", "/register"],
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SiteKind::Admin => "admin",
            SiteKind::Client => "client",
        }
    }
}

impl fmt::Display for SiteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(SiteKind::Admin),
            "client" => Ok(SiteKind::Client),
            other => Err(format!("unknown site kind: {other}")),
        }
    }
}

/// How the auth gate treats a locale-free path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login/registration pages: pointless once signed in.
    AuthOnly,
    /// Requires a session.
    Protected,
    /// Open to everyone.
    Neutral,
}

/// Fixed path lists of a site.
#[derive(Debug, Clone, Copy)]
pub struct RoutePolicy {
    pub protected_prefixes: &'static [&'static str],
    pub auth_only: &'static [&'static str],
}

impl RoutePolicy {
    /// Auth-only pages match exactly and win over protected prefixes.
    /// Prefixes are plain string prefixes: `/profile` covers
    /// `/profile/security` and `/profiles` alike.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.auth_only.contains(&path) {
            return RouteClass::AuthOnly;
        }
        if self
            .protected_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix))
        {
            return RouteClass::Protected;
        }
        RouteClass::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_policy() {
        let policy = SiteKind::Client.route_policy();
        assert_eq!(policy.classify("/profile"), RouteClass::Protected);
        assert_eq!(policy.classify("/profile/security"), RouteClass::Protected);
        assert_eq!(policy.classify("/settings"), RouteClass::Protected);
        assert_eq!(policy.classify("/profiles"), RouteClass::Protected);
        assert_eq!(policy.classify("/dashboard-old"), RouteClass::Protected);
        assert_eq!(policy.classify("/login"), RouteClass::AuthOnly);
        assert_eq!(policy.classify("/register"), RouteClass::AuthOnly);
        assert_eq!(policy.classify("/universities"), RouteClass::Neutral);
        assert_eq!(policy.classify("/"), RouteClass::Neutral);
    }

    #[test]
    fn admin_protects_everything_but_login() {
        let policy = SiteKind::Admin.route_policy();
        assert_eq!(policy.classify("/"), RouteClass::Protected);
        assert_eq!(policy.classify("/users"), RouteClass::Protected);
        assert_eq!(policy.classify("/login"), RouteClass::AuthOnly);
    }

    #[test]
    fn cookie_names_differ_per_site() {
        assert_eq!(SiteKind::Admin.auth_cookie_name(), "auth-storage");
        assert_eq!(SiteKind::Client.auth_cookie_name(), "client-auth-storage");
        assert_eq!("Client".parse::<SiteKind>(), Ok(SiteKind::Client));
    }
}
