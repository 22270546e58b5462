//! Review status constants and property rating aggregation.
//!
//! A property's rating is recomputed explicitly by the review handlers after
//! each committed review write; only approved, non-deleted reviews count.

use serde::Serialize;

/// Newly submitted review awaiting moderation.
pub const REVIEW_PENDING: &str = "pending";

/// Review visible on the listing and counted in its rating.
pub const REVIEW_APPROVED: &str = "approved";

/// Review hidden by a moderator.
pub const REVIEW_REJECTED: &str = "rejected";

/// All valid review status values.
pub const VALID_REVIEW_STATUSES: &[&str] = &[REVIEW_PENDING, REVIEW_APPROVED, REVIEW_REJECTED];

/// Validate that a moderation status string is one of the accepted values.
pub fn validate_review_status(status: &str) -> Result<(), String> {
    if VALID_REVIEW_STATUSES.contains(&status) {
        Ok(())
    } else {
        Err(format!(
            "Invalid review status '{status}'. Must be one of: {}",
            VALID_REVIEW_STATUSES.join(", ")
        ))
    }
}

/// Denormalised rating stored on a property.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average_rating: f64,
    pub total_reviews: i64,
}

impl RatingSummary {
    /// Build a summary from raw aggregate output.
    ///
    /// `average` is `None` when no review qualifies, in which case the
    /// property resets to a zero rating. Averages are rounded to one decimal.
    pub fn from_aggregate(average: Option<f64>, count: i64) -> Self {
        match average {
            Some(avg) if count > 0 => Self {
                average_rating: round_one_decimal(avg),
                total_reviews: count,
            },
            _ => Self {
                average_rating: 0.0,
                total_reviews: 0,
            },
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
