//! Report entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub reporter_id: DbId,
    pub job_id: DbId,
    pub reason: String,
    /// One of `open`, `resolved`, `dismissed`.
    pub status: String,
    pub resolved_by: Option<DbId>,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for filing a report against a job posting.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub job_id: DbId,
    pub reason: String,
}

/// DTO for an admin resolving a report.
#[derive(Debug, Deserialize)]
pub struct ResolveReport {
    /// `resolved` or `dismissed`.
    pub status: String,
}
