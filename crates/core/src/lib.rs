//! Shared leaf crate for the openreel backend.
//!
//! Holds the primitive type aliases, the domain error taxonomy, and small
//! pure helpers (slug derivation, pagination clamps) used by both the
//! repository layer and the API server. No internal dependencies.

pub mod error;
pub mod pagination;
pub mod slug;
pub mod types;
