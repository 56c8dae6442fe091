pub mod admin;
pub mod assets;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod profile;
pub mod request_id;
