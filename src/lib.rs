//! # Oquga web
//!
//! Web tier of the Oquga university platform. One binary serves either the
//! public client site or the admin back-office, selected by configuration.
//!
//! ## Architecture
//!
//! - **domain**: locales, sites and route policies, session and compare models
//! - **application**: auth gate, identity and catalog services, auth store,
//!   table parameters with debounced search, message catalogs
//! - **infrastructure**: backend API client, storage backends, image policy
//! - **interfaces**: axum router, middleware, pages and the `/api` surface
//! - **server**: listener lifecycle and graceful shutdown

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{config_path_from_env, default_config_path, AppConfig};
pub use interfaces::http::{create_router, AppState};
pub use server::ServerHandle;
