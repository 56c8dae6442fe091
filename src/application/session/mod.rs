pub mod store;

pub use store::{AuthStore, REFRESH_TOKEN_SUFFIX};
