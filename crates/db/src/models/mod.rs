//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Wire-facing serialization lives in the API crate so field exposure is an
//! explicit mapping, not inferred from row shape.

pub mod category;
pub mod comment;
pub mod like;
pub mod notification;
pub mod profile;
pub mod session;
pub mod user;
pub mod video;
pub mod video_view;
