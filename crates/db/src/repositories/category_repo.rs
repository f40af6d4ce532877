//! Repository for the `categories` table.

use sqlx::PgPool;

use openreel_core::slug::slugify;
use openreel_core::types::DbId;

use crate::models::category::Category;

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, slug, description, created_at";

/// Provides read and get-or-create operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Get or create a category by name.
    ///
    /// The slug is derived from the name, so repeating the same name always
    /// resolves to the same row. `ON CONFLICT DO NOTHING` plus a follow-up
    /// select keeps concurrent callers from duplicating it.
    pub async fn get_or_create(
        pool: &PgPool,
        name: &str,
        description: &str,
    ) -> Result<Category, sqlx::Error> {
        let slug = slugify(name);
        let insert = format!(
            "INSERT INTO categories (name, slug, description)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_categories_slug DO NOTHING
             RETURNING {COLUMNS}"
        );
        let created = sqlx::query_as::<_, Category>(&insert)
            .bind(name)
            .bind(&slug)
            .bind(description)
            .fetch_optional(pool)
            .await?;
        match created {
            Some(category) => Ok(category),
            // Row already existed; fetch it by the derived slug.
            None => {
                let select = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
                sqlx::query_as::<_, Category>(&select)
                    .bind(&slug)
                    .fetch_one(pool)
                    .await
            }
        }
    }

    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories ORDER BY name ASC");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Find a category by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a category by slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE slug = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }
}
