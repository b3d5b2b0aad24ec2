//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the minimum requirement. Use these in route handlers to enforce
//! authorization at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vakans_core::error::CoreError;
use vakans_core::roles::{ROLE_ADMIN, ROLE_CANDIDATE, ROLE_EMPLOYER};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `employer` or `admin` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn employer_only(RequireEmployer(user): RequireEmployer) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireEmployer(pub AuthUser);

impl FromRequestParts<AppState> for RequireEmployer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_ADMIN && user.role != ROLE_EMPLOYER {
            return Err(AppError::Core(CoreError::Forbidden(
                "Employer or Admin role required".into(),
            )));
        }
        Ok(RequireEmployer(user))
    }
}

/// Requires the `candidate` role. Rejects with 403 Forbidden otherwise.
///
/// Employers cannot apply to jobs, so this one intentionally does NOT
/// grant admins a pass-through.
pub struct RequireCandidate(pub AuthUser);

impl FromRequestParts<AppState> for RequireCandidate {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_CANDIDATE {
            return Err(AppError::Core(CoreError::Forbidden(
                "Candidate role required".into(),
            )));
        }
        Ok(RequireCandidate(user))
    }
}
