//! Realty domain core.
//!
//! Pure domain types and rules shared by the database and API layers. This
//! crate has no internal dependencies and performs no I/O.

pub mod booking;
pub mod contact;
pub mod error;
pub mod listing;
pub mod pagination;
pub mod review;
pub mod roles;
pub mod types;
