//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - An insert DTO built by handlers
//! - A `Deserialize` + `Validate` request body where the entity is writable over HTTP

pub mod contact;
pub mod property;
pub mod review;
pub mod role;
pub mod user;
pub mod visit;
