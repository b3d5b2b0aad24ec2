//! Notification entity model.
//!
//! A notification belongs to exactly one user and is the durable record of
//! a domain event addressed to them. It is marked read only by its owner.

use serde::Serialize;
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    /// Dot-separated domain event type, e.g. `"application.submitted"`.
    pub notification_type: String,
    pub payload: serde_json::Value,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
}
