//! Query-string state of list pages: search, page and filters.

pub mod debounce;
pub mod params;
pub mod search_sync;

pub use debounce::{Debouncer, SEARCH_DEBOUNCE};
pub use params::{DataTableParams, ALL_FILTER};
pub use search_sync::{Navigation, SearchSync};
