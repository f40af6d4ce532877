//! Profile entity model and DTOs.

use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;

use openreel_core::types::{DbId, Timestamp};

/// Profile row joined with the owning user's username and email.
///
/// Profiles are always read through their owner, so the join is baked into
/// the repository queries.
#[derive(Debug, Clone, FromRow)]
pub struct Profile {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar_path: Option<String>,
    pub location: String,
    pub website: String,
    pub date_of_birth: Option<NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for updating a profile. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateProfile {
    pub bio: Option<String>,
    pub avatar_path: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
}
