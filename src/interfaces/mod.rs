//! Inbound adapters. The only one is HTTP.

pub mod http;
