//! Chat room and message models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vakans_core::types::{DbId, Timestamp};

/// A row from the `chat_rooms` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatRoom {
    pub id: DbId,
    pub job_id: DbId,
    pub employer_id: DbId,
    pub candidate_id: DbId,
    /// `open` or `closed`. Messages are only accepted while `open`.
    pub status: String,
    pub closed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl ChatRoom {
    /// Whether the given user is one of the two participants.
    pub fn is_participant(&self, user_id: DbId) -> bool {
        self.employer_id == user_id || self.candidate_id == user_id
    }

    /// The participant on the other side of the room from `user_id`.
    pub fn peer_of(&self, user_id: DbId) -> DbId {
        if self.employer_id == user_id {
            self.candidate_id
        } else {
            self.employer_id
        }
    }
}

/// A row from the `chat_messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChatMessage {
    pub id: DbId,
    pub room_id: DbId,
    pub sender_id: DbId,
    pub body: String,
    pub created_at: Timestamp,
}

/// DTO for opening a chat room with an applicant.
#[derive(Debug, Deserialize)]
pub struct CreateRoom {
    pub job_id: DbId,
    pub candidate_id: DbId,
}

/// DTO for sending a chat message over REST.
#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub body: String,
}
