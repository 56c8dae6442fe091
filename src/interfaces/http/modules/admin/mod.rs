//! Back-office pages: the universities dashboard and administrator management.

pub mod pages;
mod views;
