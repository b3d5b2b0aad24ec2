//! Job posting entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub employer_id: DbId,
    pub category_id: DbId,
    pub title: String,
    pub description: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    /// One of `pending`, `approved`, `rejected`, `closed`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a job posting.
#[derive(Debug, Deserialize)]
pub struct CreateJob {
    pub category_id: DbId,
    pub title: String,
    pub description: String,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
}

/// DTO for updating a job posting. All fields are optional.
#[derive(Debug, Deserialize)]
pub struct UpdateJob {
    pub category_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub salary_min: Option<i64>,
    pub salary_max: Option<i64>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
}

/// Filters for the public job listing.
#[derive(Debug, Default)]
pub struct JobFilter {
    pub category_id: Option<DbId>,
    /// Case-insensitive substring match against title.
    pub search: Option<String>,
}
