//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&PgPool` as the first argument.

pub mod contact_repo;
pub mod property_repo;
pub mod review_repo;
pub mod role_repo;
pub mod user_repo;
pub mod visit_repo;

pub use contact_repo::ContactRepo;
pub use property_repo::PropertyRepo;
pub use review_repo::ReviewRepo;
pub use role_repo::RoleRepo;
pub use user_repo::UserRepo;
pub use visit_repo::{BookingConflict, VisitRepo};
