//! Property review model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Review {
    pub id: DbId,
    pub user_id: DbId,
    pub property_id: DbId,
    pub agent_id: DbId,
    pub rating: i16,
    pub title: String,
    pub comment: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new review. Status starts as `pending`.
#[derive(Debug, Clone)]
pub struct CreateReview {
    pub user_id: DbId,
    pub property_id: DbId,
    pub agent_id: DbId,
    pub rating: i16,
    pub title: String,
    pub comment: String,
}

/// Request body for `POST /properties/{property_id}/reviews`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i16,
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"))]
    pub comment: String,
}

/// Request body for `PUT /reviews/{id}`. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: Option<i16>,
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 1000, message = "Comment must be between 1 and 1000 characters"))]
    pub comment: Option<String>,
}

/// Request body for `PUT /admin/reviews/{id}/status`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ModerateReviewRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}
