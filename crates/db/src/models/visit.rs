//! Property visit model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use realty_core::booking::VisitStatus;
use realty_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `visits` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub property_id: DbId,
    pub agent_id: DbId,
    pub visitor_id: DbId,
    pub visit_date: NaiveDate,
    #[serde(with = "realty_core::booking::clock")]
    pub visit_time: NaiveTime,
    pub duration_minutes: i32,
    #[sqlx(try_from = "String")]
    pub status: VisitStatus,
    pub notes: Option<String>,
    pub cancellation_reason: Option<String>,
    #[serde(skip_serializing)]
    pub is_deleted: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Start time and length of an active booking, as read for availability.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct BookedSlot {
    pub visit_time: NaiveTime,
    pub duration_minutes: i32,
}

/// DTO for inserting a new visit. Status always starts as `pending`.
#[derive(Debug, Clone)]
pub struct CreateVisit {
    pub property_id: DbId,
    pub agent_id: DbId,
    pub visitor_id: DbId,
    pub visit_date: NaiveDate,
    pub visit_time: NaiveTime,
    pub duration_minutes: i32,
    pub notes: Option<String>,
}

/// Request body for `POST /properties/{property_id}/visits`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RequestVisitBody {
    #[serde(alias = "visitDate")]
    pub visit_date: NaiveDate,
    #[serde(alias = "visitTime", with = "realty_core::booking::clock")]
    pub visit_time: NaiveTime,
    #[serde(alias = "duration", alias = "durationMinutes")]
    #[validate(range(
        min = 15,
        max = 180,
        message = "Duration must be between 15 and 180 minutes"
    ))]
    pub duration_minutes: i32,
    #[validate(length(max = 500, message = "Notes cannot be more than 500 characters"))]
    pub notes: Option<String>,
}

/// Request body for `PUT /visits/{id}/status`.
///
/// `status` is kept as text so an unknown value surfaces as a validation
/// error rather than a body rejection.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateVisitStatusBody {
    pub status: String,
    #[serde(default, alias = "cancellationReason")]
    #[validate(length(
        max = 500,
        message = "Cancellation reason cannot be more than 500 characters"
    ))]
    pub cancellation_reason: Option<String>,
}

/// Request body for `PUT /visits/{id}/cancel`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CancelVisitBody {
    #[serde(default, alias = "cancellationReason")]
    #[validate(length(
        max = 500,
        message = "Cancellation reason cannot be more than 500 characters"
    ))]
    pub cancellation_reason: Option<String>,
}

/// Trim free text, dropping it entirely when nothing is left.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
