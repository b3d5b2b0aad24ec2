//! Handlers and delivery service for the `/chat` resource.
//!
//! [`deliver_message`] is the single send path shared by the REST endpoint
//! and the WebSocket `chat.send` event: persist first (record of truth),
//! then relay to room members, then notify the peer. A closed room rejects
//! sends with a conflict before anything is written.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use vakans_core::error::CoreError;
use vakans_core::events::{
    EVENT_NEW_MESSAGE, EVENT_NOTIFICATION, TYPE_CHAT_MESSAGE, TYPE_CHAT_ROOM_CLOSED,
};
use vakans_core::roles::ROLE_ADMIN;
use vakans_core::status::check_room_open;
use vakans_core::types::DbId;
use vakans_db::models::chat::{ChatMessage, ChatRoom, CreateRoom, SendMessage};
use vakans_db::repositories::{ApplicationRepo, ChatRepo};
use vakans_events::PlatformEvent;

use crate::error::{AppError, AppResult};
use crate::handlers::job::find_job;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireEmployer;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Delivery service (shared by REST and WebSocket paths)
// ---------------------------------------------------------------------------

/// Persist a message and relay it.
///
/// Order matters: the row is the record of truth, the realtime emission a
/// convenience for already-connected peers. The peer additionally gets a
/// durable `chat.message` notification so a missed relay is recoverable by
/// polling.
pub async fn deliver_message(
    state: &AppState,
    sender_id: DbId,
    room_id: DbId,
    body: &str,
) -> AppResult<ChatMessage> {
    if body.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Message body must not be empty".into(),
        )));
    }

    let room = find_room(state, room_id).await?;
    require_participant(&room, sender_id)?;
    check_room_open(&room.status)?;

    let message = ChatRepo::create_message(&state.pool, room_id, sender_id, body).await?;

    let data = serde_json::json!({
        "id": message.id,
        "room_id": message.room_id,
        "sender_id": message.sender_id,
        "body": message.body,
        "created_at": message.created_at,
    });
    state
        .registry
        .broadcast_room(room_id, EVENT_NEW_MESSAGE, &data)
        .await;

    state
        .dispatcher
        .dispatch(
            room.peer_of(sender_id),
            TYPE_CHAT_MESSAGE,
            EVENT_NOTIFICATION,
            serde_json::json!({
                "room_id": room_id,
                "message_id": message.id,
                "sender_id": sender_id,
            }),
        )
        .await?;

    state.event_bus.publish(
        PlatformEvent::new(TYPE_CHAT_MESSAGE)
            .with_source("chat_room", room_id)
            .with_actor(sender_id),
    );

    Ok(message)
}

/// Join a WebSocket connection to a room after a participation check.
pub async fn join_room(
    state: &AppState,
    conn_id: &str,
    user_id: DbId,
    room_id: DbId,
) -> AppResult<()> {
    let room = find_room(state, room_id).await?;
    require_participant(&room, user_id)?;
    state.registry.join_room(conn_id, room_id).await;
    Ok(())
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/chat/rooms
///
/// Open a room with a candidate who applied to one of the employer's jobs.
/// One room per (job, candidate) pair.
pub async fn create_room(
    RequireEmployer(user): RequireEmployer,
    State(state): State<AppState>,
    Json(input): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatRoom>>)> {
    let job = find_job(&state, input.job_id).await?;
    if job.employer_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the job owner may open a chat for it".into(),
        )));
    }

    // The candidate must have actually applied to this job.
    let applied =
        ApplicationRepo::exists_for_job_and_candidate(&state.pool, input.job_id, input.candidate_id)
            .await?;
    if !applied {
        return Err(AppError::Core(CoreError::Validation(
            "Candidate has not applied to this job".into(),
        )));
    }

    let room =
        ChatRepo::create_room(&state.pool, input.job_id, user.user_id, input.candidate_id).await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: room })))
}

/// GET /api/v1/chat/rooms
///
/// All rooms the authenticated user participates in.
pub async fn list_rooms(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<ChatRoom>>>> {
    let rooms = ChatRepo::list_rooms_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: rooms }))
}

/// GET /api/v1/chat/rooms/{id}/messages
///
/// Message history, oldest first. Participants only.
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Query(paging): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<ChatMessage>>>> {
    let room = find_room(&state, room_id).await?;
    require_participant(&room, auth.user_id)?;

    let messages =
        ChatRepo::list_messages(&state.pool, room_id, paging.limit(), paging.offset()).await?;
    Ok(Json(DataResponse { data: messages }))
}

/// POST /api/v1/chat/rooms/{id}/messages
///
/// Send a message over REST. Same path as the WebSocket `chat.send` event.
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
    Json(input): Json<SendMessage>,
) -> AppResult<(StatusCode, Json<DataResponse<ChatMessage>>)> {
    let message = deliver_message(&state, auth.user_id, room_id, &input.body).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// POST /api/v1/chat/rooms/{id}/close
///
/// Close a room. Participants and admins; closing twice is a conflict.
pub async fn close_room(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(room_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let room = find_room(&state, room_id).await?;
    if !room.is_participant(auth.user_id) && auth.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only a participant or admin may close the room".into(),
        )));
    }

    let closed = ChatRepo::close_room(&state.pool, room_id).await?;
    if !closed {
        return Err(AppError::Core(CoreError::Conflict(
            "Chat room is already closed".into(),
        )));
    }

    state.event_bus.publish(
        PlatformEvent::new(TYPE_CHAT_ROOM_CLOSED)
            .with_source("chat_room", room_id)
            .with_actor(auth.user_id),
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_room(state: &AppState, room_id: DbId) -> AppResult<ChatRoom> {
    ChatRepo::find_room(&state.pool, room_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Chat room",
                id: room_id,
            })
        })
}

fn require_participant(room: &ChatRoom, user_id: DbId) -> AppResult<()> {
    if !room.is_participant(user_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Not a participant of this chat room".into(),
        )));
    }
    Ok(())
}
