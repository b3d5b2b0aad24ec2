//! Route definitions for the `/chat` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
///
/// ```text
/// POST /rooms                -> create_room (employer)
/// GET  /rooms                -> list_rooms
/// GET  /rooms/{id}/messages  -> list_messages
/// POST /rooms/{id}/messages  -> send_message
/// POST /rooms/{id}/close     -> close_room
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rooms", post(chat::create_room).get(chat::list_rooms))
        .route(
            "/rooms/{id}/messages",
            get(chat::list_messages).post(chat::send_message),
        )
        .route("/rooms/{id}/close", post(chat::close_room))
}
