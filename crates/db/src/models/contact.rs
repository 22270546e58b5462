//! Contact message model and DTOs.

use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `contacts` table: a buyer's message to a listing's agent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Contact {
    pub id: DbId,
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub property_id: DbId,
    pub subject: String,
    pub message: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `contact_replies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactReply {
    pub id: DbId,
    pub contact_id: DbId,
    pub sender_id: DbId,
    pub message: String,
    pub created_at: Timestamp,
}

/// A message together with its replies, oldest reply first.
#[derive(Debug, Clone, Serialize)]
pub struct ContactThread {
    #[serde(flatten)]
    pub contact: Contact,
    pub replies: Vec<ContactReply>,
}

/// DTO for inserting a new message. The receiver is the listing's agent.
#[derive(Debug, Clone)]
pub struct CreateContact {
    pub sender_id: DbId,
    pub receiver_id: DbId,
    pub property_id: DbId,
    pub subject: String,
    pub message: String,
}

/// Request body for `POST /properties/{id}/contact`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[validate(length(min = 1, max = 100, message = "Subject must be between 1 and 100 characters"))]
    pub subject: String,
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,
}

/// Request body for `POST /contact/{id}/reply`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReplyRequest {
    #[validate(length(min = 1, max = 1000, message = "Message must be between 1 and 1000 characters"))]
    pub message: String,
}

/// Request body for `PUT /contact/{id}/status`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContactStatusRequest {
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}
