//! Application entity models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `applications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Application {
    pub id: DbId,
    pub job_id: DbId,
    pub candidate_id: DbId,
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
    /// One of `submitted`, `reviewed`, `accepted`, `rejected`.
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for submitting an application.
#[derive(Debug, Deserialize)]
pub struct CreateApplication {
    pub cover_letter: Option<String>,
    pub resume_url: Option<String>,
}

/// DTO for an employer changing an application's status.
#[derive(Debug, Deserialize)]
pub struct UpdateApplicationStatus {
    pub status: String,
}
