use serde::{Deserialize, Serialize};
use validator::Validate;

/// User as returned by `/auth/*` and `/users/profile`.
///
/// Only the admin backend fills `universityId`; the client site leaves it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[validate(email(message = "user email is not a valid address"))]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub university_id: Option<i64>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Two-letter avatar fallback.
    pub fn initials(&self) -> String {
        self.first_name
            .chars()
            .take(1)
            .chain(self.last_name.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// Body of a successful login, register or refresh.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AuthResponse {
    #[serde(alias = "accessToken")]
    #[validate(length(min = 1, message = "access token is empty"))]
    pub access_token: String,
    #[validate(nested)]
    pub user: User,
}

/// Refresh responses may omit the user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshResponse {
    #[serde(alias = "accessToken")]
    #[validate(length(min = 1, message = "access token is empty"))]
    pub access_token: String,
    #[serde(default)]
    #[validate(nested)]
    pub user: Option<User>,
}
