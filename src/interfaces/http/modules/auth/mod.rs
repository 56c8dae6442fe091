//! Sign-in, registration, token refresh and sign-out.
//!
//! `handlers` is the JSON surface under `/api/auth`; `pages` serves the
//! localized HTML forms.

pub mod handlers;
pub mod pages;
mod views;

pub use pages::safe_callback;
