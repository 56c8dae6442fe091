pub mod catalog;
pub mod dto;
pub mod gate;
pub mod i18n;
pub mod identity;
pub mod ports;
pub mod session;
pub mod table;

// Re-export key types for convenience
pub use catalog::{CatalogService, CreateUniversityForm, UniversityEditForm};
pub use gate::{decide, is_bypassed, login_redirect, GateDecision};
pub use i18n::{Catalog, Messages};
pub use identity::{
    CreateUniversityAdminForm, FormSchema, IdentityService, LoginForm, PasswordForm, ProfileForm,
    RegisterForm, SessionUpdate,
};
pub use ports::{ApiResult, IdentityBackend, UniversityBackend};
pub use session::AuthStore;
pub use table::{DataTableParams, Debouncer, Navigation, SearchSync, ALL_FILTER, SEARCH_DEBOUNCE};
