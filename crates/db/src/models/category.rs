//! Category entity model.

use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: Timestamp,
}
