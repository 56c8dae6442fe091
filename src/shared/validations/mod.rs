//! Field-level validation errors.
//!
//! `validator` reports errors under Rust field names (`confirm_password`);
//! forms and JSON clients address fields by their wire names
//! (`confirmPassword`). [`FieldErrors`] stores messages under the wire path.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

/// Messages grouped by field path, ordered by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// First message for `path`, the one a form shows under the input.
    pub fn first(&self, path: &str) -> Option<&str> {
        self.0.get(path).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("validation failed");
        }
        let mut first = true;
        for (path, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{}: {}", path, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, errs) in errors.field_errors() {
            let path = to_field_path(&field.to_string());
            for e in errs.iter() {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                out.add(path.clone(), message);
            }
        }
        out
    }
}

/// `confirm_password` -> `confirmPassword`.
pub fn to_field_path(rust_name: &str) -> String {
    let mut out = String::with_capacity(rust_name.len());
    let mut upper = false;
    for c in rust_name.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Clamp a requested page number to `1..`.
pub fn normalize_page(page: Option<u32>) -> u32 {
    page.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    #[test]
    fn converts_snake_case_to_wire_path() {
        assert_eq!(to_field_path("confirm_password"), "confirmPassword");
        assert_eq!(to_field_path("email"), "email");
        assert_eq!(to_field_path("university_id"), "universityId");
    }

    #[test]
    fn collects_messages_from_validator() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "confirm_new_password",
            ValidationError::new("mismatch").with_message("Passwords do not match".into()),
        );
        errors.add("email", ValidationError::new("email"));

        let fields = FieldErrors::from(errors);
        assert_eq!(
            fields.first("confirmNewPassword"),
            Some("Passwords do not match")
        );
        assert_eq!(fields.first("email"), Some("email"));
        assert!(!fields.contains("confirm_new_password"));
    }

    #[test]
    fn display_joins_all_messages() {
        let mut fields = FieldErrors::new();
        fields.add("a", "one");
        fields.add("b", "two");
        assert_eq!(fields.to_string(), "a: one; b: two");
    }

    #[test]
    fn page_is_at_least_one() {
        assert_eq!(normalize_page(None), 1);
        assert_eq!(normalize_page(Some(0)), 1);
        assert_eq!(normalize_page(Some(7)), 7);
    }
}
