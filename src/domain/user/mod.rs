//! Authenticated principal as reported by the backend.

pub mod model;

pub use model::{AuthResponse, RefreshResponse, User};
