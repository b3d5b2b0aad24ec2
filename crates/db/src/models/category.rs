//! Category entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `category_follows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryFollow {
    pub id: DbId,
    pub user_id: DbId,
    pub category_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for creating a category (admin only).
#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}
