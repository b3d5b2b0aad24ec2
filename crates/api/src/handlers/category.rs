//! Handlers for the `/categories` resource, including follows.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use vakans_core::error::CoreError;
use vakans_core::types::DbId;
use vakans_db::models::category::{Category, CreateCategory};
use vakans_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/categories
///
/// List active categories. Public.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let categories = CategoryRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /api/v1/categories
///
/// Create a category. Admin only.
pub async fn create_category(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    if input.name.trim().is_empty() || input.slug.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Category name and slug must not be empty".into(),
        )));
    }
    let category = CategoryRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// POST /api/v1/categories/{id}/follow
///
/// Follow a category to receive `job_update` notifications for it.
pub async fn follow_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<StatusCode> {
    CategoryRepo::find_by_id(&state.pool, category_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Category",
                id: category_id,
            })
        })?;

    CategoryRepo::follow(&state.pool, auth.user_id, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/categories/{id}/follow
///
/// Stop following a category. Returns 404 if there was no follow.
pub async fn unfollow_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(category_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CategoryRepo::unfollow(&state.pool, auth.user_id, category_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Category follow",
            id: category_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
