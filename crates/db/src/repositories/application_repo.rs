//! Repository for the `applications` table.

use sqlx::PgPool;
use vakans_core::types::DbId;

use crate::models::application::{Application, CreateApplication};

/// Column list for `applications` queries.
const COLUMNS: &str =
    "id, job_id, candidate_id, cover_letter, resume_url, status, created_at, updated_at";

/// Provides CRUD operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application in `submitted` status, returning the full
    /// row. The unique (job, candidate) constraint surfaces duplicates as
    /// a 409 through the API error classifier.
    pub async fn create(
        pool: &PgPool,
        job_id: DbId,
        candidate_id: DbId,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications (job_id, candidate_id, cover_letter, resume_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(job_id)
            .bind(candidate_id)
            .bind(input.cover_letter.as_deref())
            .bind(input.resume_url.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All applications submitted by a candidate, newest first.
    pub async fn list_for_candidate(
        pool: &PgPool,
        candidate_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE candidate_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(candidate_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All applications for a job (owning employer's review queue),
    /// oldest first.
    pub async fn list_for_job(
        pool: &PgPool,
        job_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications WHERE job_id = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(job_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Whether the candidate has an application for the job.
    pub async fn exists_for_job_and_candidate(
        pool: &PgPool,
        job_id: DbId,
        candidate_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM applications WHERE job_id = $1 AND candidate_id = $2)",
        )
        .bind(job_id)
        .bind(candidate_id)
        .fetch_one(pool)
        .await
    }

    /// Set an application's status, returning the updated row.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET status = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
    }
}
