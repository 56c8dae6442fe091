//! Form payloads accepted from browsers and JSON clients.
//!
//! Field names are camelCase on the wire, so validation messages land under
//! the same paths the page renders inputs with.

use serde::{Deserialize, Deserializer};
use validator::Validate;

use crate::application::dto::{
    ChangePasswordRequest, CreateUniversityAdminRequest, LoginRequest, RegisterRequest,
    UpdateProfileRequest,
};
use crate::shared::FieldErrors;

pub const PASSWORDS_DO_NOT_MATCH: &str = "passwords do not match";

/// Declarative checks plus cross-field refinements.
pub trait FormSchema: Validate + Sized {
    /// Trim and otherwise tidy raw input before validation.
    fn normalize(&mut self) {}

    /// Cross-field rules. Runs even when field rules already failed so the
    /// user sees every problem at once.
    fn refine(&self, _errors: &mut FieldErrors) {}

    fn check(mut self) -> Result<Self, FieldErrors> {
        self.normalize();
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };
        self.refine(&mut errors);
        errors.into_result().map(|()| self)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LoginForm {
    #[serde(default)]
    #[validate(email(message = "enter a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
}

impl FormSchema for LoginForm {
    fn normalize(&mut self) {
        self.email = self.email.trim().to_string();
    }
}

impl From<LoginForm> for LoginRequest {
    fn from(form: LoginForm) -> Self {
        Self {
            email: form.email,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    #[serde(default)]
    #[validate(length(min = 2, message = "first name must be at least 2 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "last name must be at least 2 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "enter a valid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

impl FormSchema for RegisterForm {
    fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_string();
    }

    fn refine(&self, errors: &mut FieldErrors) {
        if self.password != self.confirm_password {
            errors.add("confirmPassword", PASSWORDS_DO_NOT_MATCH);
        }
    }
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileForm {
    #[serde(default)]
    #[validate(length(min = 2, message = "first name must be at least 2 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "last name must be at least 2 characters"))]
    pub last_name: String,
}

impl FormSchema for ProfileForm {
    fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
    }
}

impl From<ProfileForm> for UpdateProfileRequest {
    fn from(form: ProfileForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "enter your current password"))]
    pub current_password: String,
    #[serde(default)]
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "confirm the new password"))]
    pub confirm_new_password: String,
}

impl FormSchema for PasswordForm {
    fn refine(&self, errors: &mut FieldErrors) {
        if !self.confirm_new_password.is_empty() && self.new_password != self.confirm_new_password
        {
            errors.add("confirmNewPassword", PASSWORDS_DO_NOT_MATCH);
        }
    }
}

impl From<PasswordForm> for ChangePasswordRequest {
    fn from(form: PasswordForm) -> Self {
        Self {
            current_password: form.current_password,
            new_password: form.new_password,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUniversityAdminForm {
    #[serde(default)]
    #[validate(length(min = 2, message = "at least 2 characters"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(min = 2, message = "at least 2 characters"))]
    pub last_name: String,
    #[serde(default)]
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 6, message = "at least 6 characters"))]
    pub password: String,
    #[serde(default, deserialize_with = "lenient_id")]
    #[validate(range(min = 1, message = "select a university"))]
    pub university_id: i64,
}

impl FormSchema for CreateUniversityAdminForm {
    fn normalize(&mut self) {
        self.first_name = self.first_name.trim().to_string();
        self.last_name = self.last_name.trim().to_string();
        self.email = self.email.trim().to_string();
    }
}

impl From<CreateUniversityAdminForm> for CreateUniversityAdminRequest {
    fn from(form: CreateUniversityAdminForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            university_id: form.university_id,
        }
    }
}

/// Accepts a JSON number or the text of an HTML input; blank or garbage
/// becomes 0 and is reported by the range rule.
fn lenient_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(i64),
        Text(String),
    }

    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => n,
        NumberOrText::Text(s) => s.trim().parse().unwrap_or(0),
    })
}
