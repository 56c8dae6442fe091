pub mod compare;
pub mod locale;
pub mod session;
pub mod site;
pub mod university;
pub mod user;

// Re-export commonly used types
pub use compare::{CompareList, COMPARE_COOKIE, MAX_COMPARE_ITEMS};
pub use locale::{localized_path, negotiate, split_locale, switch_locale_path, Locale};
pub use session::{session_from_cookie, AuthSession, PersistedAuth};
pub use site::{RouteClass, RoutePolicy, SiteKind};
pub use university::{
    SectionProgress, University, UniversityAdmin, UniversityDetail, UniversityDetailTranslation,
    UniversityProgress, UniversityTranslation,
};
pub use user::{AuthResponse, RefreshResponse, User};

// Re-export DomainError from shared for convenience
pub use crate::shared::types::errors::{DomainError, DomainResult};
