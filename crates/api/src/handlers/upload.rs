//! Handler for file uploads (resumes, company logos).
//!
//! Files land in the configured upload directory under a UUID name and are
//! served back by the static file route mounted at `/uploads`.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use vakans_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Extensions accepted for upload.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "png", "jpg", "jpeg", "webp"];

/// Maximum accepted file size in bytes (5 MiB).
const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

/// POST /api/v1/uploads
///
/// Accept a single `file` part and return its public URL.
pub async fn upload_file(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
        .ok_or_else(|| AppError::BadRequest("Missing file part".into()))?;

    let original_name = field.file_name().unwrap_or("upload").to_string();
    let extension = original_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("File must have an extension".into()))
        })?;

    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Extension '.{extension}' is not allowed"
        ))));
    }

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;

    if bytes.len() > MAX_FILE_BYTES {
        return Err(AppError::Core(CoreError::Validation(format!(
            "File exceeds the {MAX_FILE_BYTES} byte limit"
        ))));
    }

    let stored_name = format!("{}.{extension}", uuid::Uuid::new_v4());
    let dir = std::path::Path::new(&state.config.upload_dir);
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload dir error: {e}")))?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store file: {e}")))?;

    tracing::info!(
        user_id = auth.user_id,
        file = %stored_name,
        size = bytes.len(),
        "File uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "data": { "url": format!("/uploads/{stored_name}") }
        })),
    ))
}
