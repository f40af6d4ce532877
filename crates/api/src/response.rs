//! Shared response envelope types for API handlers.
//!
//! All list/detail responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Standard `{ "status": ... }` envelope for action endpoints that have no
/// meaningful payload (view recorded, marked as read, ...).
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
}
