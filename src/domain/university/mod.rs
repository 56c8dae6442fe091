//! Universities and the administrators attached to them.

pub mod detail;
pub mod model;

pub use detail::{SectionProgress, UniversityDetail, UniversityDetailTranslation, UniversityProgress};
pub use model::{University, UniversityAdmin, UniversityTranslation};
