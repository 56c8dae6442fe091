pub mod forms;
pub mod service;

pub use forms::{
    CreateUniversityAdminForm, FormSchema, LoginForm, PasswordForm, ProfileForm, RegisterForm,
    PASSWORDS_DO_NOT_MATCH,
};
pub use service::{IdentityService, SessionUpdate};
