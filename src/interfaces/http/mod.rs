//! HTTP surface of a site
//!
//! - `router`: routes per site plus the middleware stack
//! - `middleware`: auth gate and locale cookie
//! - `session`: per-request auth store seeded from cookies
//! - `modules`: page and JSON handlers by feature

pub mod common;
pub mod cookies;
pub mod error;
pub mod locale;
pub mod middleware;
pub mod modules;
pub mod render;
pub mod router;
pub mod session;
pub mod state;

pub use router::create_router;
pub use state::AppState;
