use thiserror::Error;

use crate::shared::validations::FieldErrors;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(FieldErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::Validation(FieldErrors::from(errors))
    }
}

impl From<FieldErrors> for DomainError {
    fn from(errors: FieldErrors) -> Self {
        DomainError::Validation(errors)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failures talking to the backend API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Schema(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl ApiError {
    /// HTTP status worth relaying to the browser.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Status { status, .. } => *status,
            ApiError::Unauthorized => 401,
            ApiError::Transport(_) | ApiError::Schema(_) => 502,
            ApiError::Domain(_) => 500,
        }
    }

    /// Message safe to show next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Status { message, .. } if !message.is_empty() => message.clone(),
            ApiError::Status { status, .. } => format!("Request failed with status {status}"),
            ApiError::Unauthorized => "Session expired, please sign in again".to_string(),
            ApiError::Transport(_) | ApiError::Schema(_) => {
                "Service is temporarily unavailable".to_string()
            }
            ApiError::Domain(e) => e.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl AppError {
    /// Field errors of a rejected form, if that is what this is.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            AppError::Domain(DomainError::Validation(fields)) => Some(fields),
            _ => None,
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Domain(DomainError::Validation(errors))
    }
}
