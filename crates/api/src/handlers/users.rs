//! Handlers for the `/users` and `/admin/users` resources.
//!
//! Registration and account administration require the `admin` role.
//! Credentials are not stored here; callers authenticate with externally
//! issued tokens.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::roles::VALID_ROLES;
use realty_core::types::DbId;
use realty_db::models::role::Role;
use realty_db::models::user::{CreateUser, RegisterUserRequest, UpdateRoleRequest, User};
use realty_db::repositories::{RoleRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_blank, UserListParams};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

/// Look up a role by case-insensitive name.
async fn resolve_role(state: &AppState, raw: &str) -> AppResult<Role> {
    let role_name = raw.trim().to_lowercase();
    RoleRepo::find_by_name(&state.pool, &role_name)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "Invalid role '{role_name}'. Must be one of: {}",
                VALID_ROLES.join(", ")
            )))
        })
}

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<RegisterUserRequest>,
) -> AppResult<Created<User>> {
    let role = resolve_role(&state, &input.role).await?;

    let create_dto = CreateUser {
        name: input.name.trim().to_string(),
        email: input.email.trim().to_lowercase(),
        role_id: role.id,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    tracing::info!(user_id = user.id, role = %role.name, admin_id = admin.user_id, "User registered");
    Ok(created(user))
}

/// GET /api/v1/users/me
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<User>>> {
    let found = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or_else(|| not_found(user.user_id))?;
    Ok(Json(DataResponse { data: found }))
}

/// GET /api/v1/admin/users?role=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    QueryParams(params): QueryParams<UserListParams>,
) -> AppResult<Json<DataResponse<Vec<User>>>> {
    let role = match non_blank(params.role.as_deref()) {
        Some(raw) => Some(resolve_role(&state, raw).await?.name),
        None => None,
    };
    let users = UserRepo::list(&state.pool, role.as_deref(), params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<User>>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/v1/admin/users/{id}/role
///
/// The new role applies from the user's next request.
pub async fn update_role(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateRoleRequest>,
) -> AppResult<Json<DataResponse<User>>> {
    let role = resolve_role(&state, &input.role).await?;
    let user = UserRepo::set_role(&state.pool, id, role.id)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = id, role = %role.name, admin_id = admin.user_id, "User role changed");
    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivates the account. Tokens held by the user stop working on their
/// next request.
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    if UserRepo::deactivate(&state.pool, id).await? {
        tracing::info!(user_id = id, admin_id = admin.user_id, "User deactivated");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
