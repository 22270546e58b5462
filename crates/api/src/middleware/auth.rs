//! JWT-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use realty_core::error::CoreError;
use realty_core::types::DbId;
use realty_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from a JWT Bearer token in the
/// `Authorization` header.
///
/// The token only proves who the caller is. The role is read from the
/// database on every request, so role changes and deactivation take effect
/// without waiting for tokens to expire.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: DbId,
    /// The user's current role name (`buyer`, `agent` or `admin`).
    pub role: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        let identity = UserRepo::resolve_identity(&state.pool, claims.sub)
            .await?
            .ok_or_else(|| {
                tracing::warn!(user_id = claims.sub, "Token presented for unknown or inactive user");
                AppError::Core(CoreError::Unauthorized(
                    "User not found or inactive".into(),
                ))
            })?;

        Ok(AuthUser {
            user_id: identity.id,
            role: identity.role,
        })
    }
}
