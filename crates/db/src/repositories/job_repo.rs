//! Repository for the `jobs` table.

use sqlx::PgPool;
use vakans_core::types::DbId;

use crate::models::job::{CreateJob, Job, JobFilter, UpdateJob};

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, employer_id, category_id, title, description, salary_min, \
     salary_max, location, employment_type, status, created_at, updated_at";

/// Provides CRUD operations for job postings.
pub struct JobRepo;

impl JobRepo {
    /// Insert a new job in `pending` status, returning the full row.
    pub async fn create(
        pool: &PgPool,
        employer_id: DbId,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs \
                (employer_id, category_id, title, description, salary_min, salary_max, \
                 location, employment_type) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(employer_id)
            .bind(input.category_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.salary_min)
            .bind(input.salary_max)
            .bind(input.location.as_deref())
            .bind(input.employment_type.as_deref())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Public listing: approved jobs only, with optional category and
    /// title-substring filters, newest first.
    pub async fn list_approved(
        pool: &PgPool,
        filter: &JobFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs \
             WHERE status = 'approved' \
               AND ($1::bigint IS NULL OR category_id = $1) \
               AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%') \
             ORDER BY created_at DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(filter.category_id)
            .bind(filter.search.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All jobs belonging to an employer, any status, newest first.
    pub async fn list_for_employer(
        pool: &PgPool,
        employer_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs WHERE employer_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(employer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Jobs in a given status (admin moderation queue), oldest first so
    /// the queue drains in submission order.
    pub async fn list_by_status(
        pool: &PgPool,
        status: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Job>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM jobs WHERE status = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update job fields. Editing an approved job sends it back to
    /// moderation (`pending`).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET \
                category_id = COALESCE($2, category_id), \
                title = COALESCE($3, title), \
                description = COALESCE($4, description), \
                salary_min = COALESCE($5, salary_min), \
                salary_max = COALESCE($6, salary_max), \
                location = COALESCE($7, location), \
                employment_type = COALESCE($8, employment_type), \
                status = 'pending', \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(input.category_id)
            .bind(input.title.as_deref())
            .bind(input.description.as_deref())
            .bind(input.salary_min)
            .bind(input.salary_max)
            .bind(input.location.as_deref())
            .bind(input.employment_type.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Set a job's status, returning the updated row.
    pub async fn set_status(pool: &PgPool, id: DbId, status: &str) -> Result<Job, sqlx::Error> {
        let query = format!(
            "UPDATE jobs SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Delete a job. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
