//! Property listing model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: DbId,
    pub agent_id: DbId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub city: String,
    pub property_type: String,
    pub listing_type: String,
    pub status: String,
    pub image_urls: Vec<String>,
    pub average_rating: f64,
    pub total_reviews: i64,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new listing. Images are attached after upload.
#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub agent_id: DbId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub city: String,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
}

/// Request body for `POST /properties`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: String,
    #[validate(length(max = 2000, message = "Description cannot be more than 2000 characters"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: f64,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: String,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Request body for `PUT /properties/{id}`. Omitted fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePropertyRequest {
    #[validate(length(min = 1, max = 100, message = "Title must be between 1 and 100 characters"))]
    pub title: Option<String>,
    #[validate(length(max = 2000, message = "Description cannot be more than 2000 characters"))]
    pub description: Option<String>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 100, message = "City is required"))]
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// DTO for a partial listing update, after trimming and image upload.
#[derive(Debug, Clone, Default)]
pub struct UpdateProperty {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub city: Option<String>,
    pub property_type: Option<String>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// Favorite state of a listing as seen by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteState {
    pub property_id: DbId,
    pub favorited: bool,
    pub favorites_count: i64,
}

/// Query parameters for `GET /properties`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyFilter {
    pub city: Option<String>,
    pub listing_type: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
