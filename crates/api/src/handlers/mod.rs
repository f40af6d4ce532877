//! HTTP handlers, one module per resource.

pub mod auth;
pub mod category;
pub mod comment;
pub mod like;
pub mod notification;
pub mod profile;
pub mod search;
pub mod video;
