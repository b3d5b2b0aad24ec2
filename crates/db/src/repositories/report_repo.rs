//! Repository for the `reports` table.

use sqlx::PgPool;
use vakans_core::types::DbId;

use crate::models::report::Report;

/// Column list for `reports` queries.
const COLUMNS: &str =
    "id, reporter_id, job_id, reason, status, resolved_by, resolved_at, created_at";

/// Provides CRUD operations for job reports.
pub struct ReportRepo;

impl ReportRepo {
    /// File a report against a job, returning the full row.
    pub async fn create(
        pool: &PgPool,
        reporter_id: DbId,
        job_id: DbId,
        reason: &str,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (reporter_id, job_id, reason) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(reporter_id)
            .bind(job_id)
            .bind(reason)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Reports in a given status (admin queue), oldest first.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports WHERE status = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Resolve or dismiss an open report, returning the updated row.
    pub async fn resolve(
        pool: &PgPool,
        id: DbId,
        status: &str,
        resolved_by: DbId,
    ) -> Result<Report, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET status = $2, resolved_by = $3, resolved_at = NOW() \
             WHERE id = $1 AND status = 'open' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(status)
            .bind(resolved_by)
            .fetch_one(pool)
            .await
    }
}
