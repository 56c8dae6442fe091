//! Authenticated session and the JSON envelope it is persisted in.
//!
//! The same envelope is written to storage and to the readable auth cookie:
//!
//! ```json
//! {"state":{"user":{...},"accessToken":"...","isAuthenticated":true},"version":0}
//! ```

use serde::{Deserialize, Serialize};

use super::user::User;

pub const PERSIST_VERSION: u32 = 0;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User, access_token: impl Into<String>) -> Self {
        Self {
            user: Some(user),
            access_token: Some(access_token.into()),
            is_authenticated: true,
        }
    }

    /// The flag alone is not enough: an empty token never authenticates.
    pub fn is_valid(&self) -> bool {
        self.is_authenticated && self.access_token.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAuth {
    pub state: AuthSession,
    #[serde(default)]
    pub version: u32,
}

impl PersistedAuth {
    pub fn new(state: AuthSession) -> Self {
        Self {
            state,
            version: PERSIST_VERSION,
        }
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode a stored or cookie value. Values written by browsers may be
    /// percent-encoded; both forms are accepted.
    pub fn decode(raw: &str) -> Result<Self, serde_json::Error> {
        match serde_json::from_str(raw) {
            Ok(parsed) => Ok(parsed),
            Err(first) => {
                let Ok(decoded) = urlencoding::decode(raw) else {
                    return Err(first);
                };
                if decoded == raw {
                    return Err(first);
                }
                serde_json::from_str(&decoded)
            }
        }
    }
}

/// Session carried by a cookie value. Anything unreadable is anonymous.
pub fn session_from_cookie(raw: Option<&str>) -> AuthSession {
    raw.and_then(|value| PersistedAuth::decode(value).ok())
        .map(|persisted| persisted.state)
        .unwrap_or_default()
}
