//! Request extractors applied across handlers.

pub mod auth;
pub mod client_meta;
