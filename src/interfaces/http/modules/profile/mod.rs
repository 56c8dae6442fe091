//! Profile editing and password change.

pub mod handlers;
pub mod pages;
mod views;
