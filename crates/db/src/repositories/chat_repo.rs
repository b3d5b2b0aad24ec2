//! Repository for the `chat_rooms` and `chat_messages` tables.

use sqlx::PgPool;
use vakans_core::types::DbId;

use crate::models::chat::{ChatMessage, ChatRoom};

/// Column list for `chat_rooms` queries.
const ROOM_COLUMNS: &str =
    "id, job_id, employer_id, candidate_id, status, closed_at, created_at";

/// Column list for `chat_messages` queries.
const MESSAGE_COLUMNS: &str = "id, room_id, sender_id, body, created_at";

/// Provides CRUD operations for chat rooms and messages.
pub struct ChatRepo;

impl ChatRepo {
    /// Open a new room for a (job, candidate) pair, returning the full row.
    pub async fn create_room(
        pool: &PgPool,
        job_id: DbId,
        employer_id: DbId,
        candidate_id: DbId,
    ) -> Result<ChatRoom, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_rooms (job_id, employer_id, candidate_id) \
             VALUES ($1, $2, $3) \
             RETURNING {ROOM_COLUMNS}"
        );
        sqlx::query_as::<_, ChatRoom>(&query)
            .bind(job_id)
            .bind(employer_id)
            .bind(candidate_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_room(pool: &PgPool, id: DbId) -> Result<Option<ChatRoom>, sqlx::Error> {
        let query = format!("SELECT {ROOM_COLUMNS} FROM chat_rooms WHERE id = $1");
        sqlx::query_as::<_, ChatRoom>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All rooms the user participates in, most recently created first.
    pub async fn list_rooms_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ChatRoom>, sqlx::Error> {
        let query = format!(
            "SELECT {ROOM_COLUMNS} FROM chat_rooms \
             WHERE employer_id = $1 OR candidate_id = $1 \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ChatRoom>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Mark a room closed. Returns `true` if the room was open and is now
    /// closed, `false` if it was already closed or does not exist.
    pub async fn close_room(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE chat_rooms SET status = 'closed', closed_at = NOW() \
             WHERE id = $1 AND status = 'open'",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Persist a message, returning the full row.
    pub async fn create_message(
        pool: &PgPool,
        room_id: DbId,
        sender_id: DbId,
        body: &str,
    ) -> Result<ChatMessage, sqlx::Error> {
        let query = format!(
            "INSERT INTO chat_messages (room_id, sender_id, body) \
             VALUES ($1, $2, $3) \
             RETURNING {MESSAGE_COLUMNS}"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(room_id)
            .bind(sender_id)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Messages in a room, oldest first.
    pub async fn list_messages(
        pool: &PgPool,
        room_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatMessage>, sqlx::Error> {
        let query = format!(
            "SELECT {MESSAGE_COLUMNS} FROM chat_messages WHERE room_id = $1 \
             ORDER BY created_at ASC LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, ChatMessage>(&query)
            .bind(room_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
