//! Pagination defaults and clamping helpers.
//!
//! This module lives in `core` (zero internal deps) so both the repository
//! layer and the API handlers share the same limits.

/// Default number of rows per page for list endpoints.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of rows per page for list endpoints.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp an optional limit into `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp an optional offset to be non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
