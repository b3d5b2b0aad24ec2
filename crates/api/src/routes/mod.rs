pub mod admin;
pub mod application;
pub mod auth;
pub mod category;
pub mod chat;
pub mod health;
pub mod job;
pub mod notification;
pub mod report;
pub mod upload;
pub mod user;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                                  WebSocket (token query param)
///
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /me                                  get, update own profile
///
/// /categories                          list (public), create (admin)
/// /categories/{id}/follow              follow, unfollow
///
/// /jobs                                public listing, create (employer)
/// /jobs/mine                           employer's own jobs
/// /jobs/{id}                           get, update, delete
/// /jobs/{id}/close                     close (owner)
/// /jobs/{id}/applications              apply (candidate), list (owner)
///
/// /applications/mine                   candidate's applications
/// /applications/{id}/status            review transition (owner)
///
/// /chat/rooms                          open room (employer), list mine
/// /chat/rooms/{id}/messages            history, send
/// /chat/rooms/{id}/close               close room
///
/// /notifications                       list
/// /notifications/read-all              mark all read
/// /notifications/unread-count          unread count
/// /notifications/{id}/read             mark read
///
/// /reports                             file (auth), list (admin)
/// /reports/{id}/resolve                resolve/dismiss (admin)
///
/// /admin/jobs                          moderation queue
/// /admin/jobs/{id}/approve             approve + follower fan-out
/// /admin/jobs/{id}/reject              reject
/// /admin/users                         list users
/// /admin/users/{id}/ban                ban
/// /admin/users/{id}/unban              unban
///
/// /uploads                             multipart upload
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // WebSocket endpoint.
        .route("/ws", get(ws::ws_handler))
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Own-profile routes.
        .merge(user::router())
        // Categories and follows.
        .nest("/categories", category::router())
        // Job postings (nests per-job applications).
        .nest("/jobs", job::router())
        // Candidate-side application routes.
        .nest("/applications", application::router())
        // Employer/candidate chat.
        .nest("/chat", chat::router())
        // Notifications.
        .nest("/notifications", notification::router())
        // Job reports.
        .nest("/reports", report::router())
        // Admin moderation.
        .nest("/admin", admin::router())
        // File uploads.
        .nest("/uploads", upload::router())
}
