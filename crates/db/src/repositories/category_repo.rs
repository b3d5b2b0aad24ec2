//! Repository for the `categories` and `category_follows` tables.

use sqlx::PgPool;
use vakans_core::types::DbId;

use crate::models::category::{Category, CreateCategory};

/// Column list for `categories` queries.
const COLUMNS: &str = "id, name, slug, description, is_active, created_at, updated_at";

/// Provides CRUD operations for categories and follows.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category, returning the full row.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, slug, description) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(input.description.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active categories ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE is_active = true ORDER BY name");
        sqlx::query_as::<_, Category>(&query).fetch_all(pool).await
    }

    /// Follow a category. Conflicts on the unique (user, category) pair
    /// surface as a 409 through the API error classifier.
    pub async fn follow(pool: &PgPool, user_id: DbId, category_id: DbId) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO category_follows (user_id, category_id) \
             VALUES ($1, $2) \
             RETURNING id",
        )
        .bind(user_id)
        .bind(category_id)
        .fetch_one(pool)
        .await
    }

    /// Unfollow a category. Returns `true` if a follow row was deleted.
    pub async fn unfollow(
        pool: &PgPool,
        user_id: DbId,
        category_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM category_follows WHERE user_id = $1 AND category_id = $2")
                .bind(user_id)
                .bind(category_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All active users following the given category.
    pub async fn follower_ids(pool: &PgPool, category_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT cf.user_id FROM category_follows cf \
             JOIN users u ON cf.user_id = u.id \
             WHERE cf.category_id = $1 AND u.is_active = true",
        )
        .bind(category_id)
        .fetch_all(pool)
        .await
    }
}
