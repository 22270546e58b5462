//! Lookups against the seeded `roles` table.

use sqlx::PgPool;

use crate::models::role::Role;

/// Roles are seeded by migration and never written at runtime.
pub struct RoleRepo;

impl RoleRepo {
    /// Resolve a role by name, ignoring case and surrounding whitespace.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Role>, sqlx::Error> {
        sqlx::query_as::<_, Role>(
            "SELECT id, name, description, created_at, updated_at
             FROM roles
             WHERE name = lower(trim($1))",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }
}
