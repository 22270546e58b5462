pub mod contact;
pub mod properties;
pub mod reviews;
pub mod users;
pub mod visits;
