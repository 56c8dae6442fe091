//! Request payloads sent to the backend.

pub mod auth;
pub mod catalog;

pub use auth::{ChangePasswordRequest, LoginRequest, RegisterRequest, UpdateProfileRequest};
pub use catalog::{
    CreateUniversityAdminRequest, CreateUniversityRequest, CreateUniversityTranslation, ListQuery,
    UpdateUniversityRequest, UpdateUniversityTranslation,
};
