//! Well-known role name constants.
//!
//! These must match the seed data in `20240301000001_create_roles_and_users.sql`.

pub const ROLE_BUYER: &str = "buyer";
pub const ROLE_AGENT: &str = "agent";
pub const ROLE_ADMIN: &str = "admin";

/// All roles a user may be registered with.
pub const VALID_ROLES: &[&str] = &[ROLE_BUYER, ROLE_AGENT, ROLE_ADMIN];

/// Whether the role may manage listings and the visits booked against them.
pub fn is_agent_or_admin(role: &str) -> bool {
    role == ROLE_AGENT || role == ROLE_ADMIN
}
