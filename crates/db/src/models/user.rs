//! User entity model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Full user row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role_id: DbId,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Identity resolved for an authenticated caller: who they are and what
/// role they currently hold.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserIdentity {
    pub id: DbId,
    pub role: String,
}

/// DTO for inserting a new user.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub role_id: DbId,
}

/// Request body for `POST /users`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUserRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    /// Role name: `buyer`, `agent` or `admin`.
    pub role: String,
}

/// Request body for `PUT /admin/users/{id}/role`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRoleRequest {
    /// Role name: `buyer`, `agent` or `admin`.
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}
