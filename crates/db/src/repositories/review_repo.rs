//! Repository for the `reviews` table.
//!
//! The listing's `average_rating` / `total_reviews` are derived values.
//! Callers refresh them with [`ReviewRepo::recompute_property_rating`] after
//! every write that can change the set of approved reviews.

use realty_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use realty_core::review::{RatingSummary, REVIEW_APPROVED};
use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{CreateReview, Review, UpdateReviewRequest};
use crate::repositories::PropertyRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, property_id, agent_id, rating, title, comment, status, \
    is_deleted, created_at, updated_at";

/// Unique constraint allowing one review per user and property.
pub const ONE_REVIEW_PER_USER_CONSTRAINT: &str = "uq_reviews_user_property";

/// Provides CRUD and moderation operations for reviews.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a new pending review, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (user_id, property_id, agent_id, rating, title, comment)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(input.user_id)
            .bind(input.property_id)
            .bind(input.agent_id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.comment)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted review by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reviews WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Approved, non-deleted reviews of a listing, newest first.
    pub async fn list_approved_for_property(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE property_id = $1 AND status = $2 AND NOT is_deleted
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(property_id)
            .bind(REVIEW_APPROVED)
            .fetch_all(pool)
            .await
    }

    /// All non-deleted reviews regardless of status, newest first.
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reviews
             WHERE NOT is_deleted AND ($1::TEXT IS NULL OR status = $1)
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(status)
            .bind(clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT))
            .bind(clamp_offset(offset))
            .fetch_all(pool)
            .await
    }

    /// Apply a partial edit. `None` fields keep their stored value.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReviewRequest,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET
                rating = COALESCE($2, rating),
                title = COALESCE($3, title),
                comment = COALESCE($4, comment)
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(input.rating)
            .bind(&input.title)
            .bind(&input.comment)
            .fetch_optional(pool)
            .await
    }

    /// Set the moderation status of a review.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET status = $2
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a review, returning the row as it was marked.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!(
            "UPDATE reviews SET is_deleted = true
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Recalculate a listing's rating from its approved, non-deleted reviews
    /// and store it on the listing.
    pub async fn recompute_property_rating(
        pool: &PgPool,
        property_id: DbId,
    ) -> Result<RatingSummary, sqlx::Error> {
        let (average, count): (Option<f64>, i64) = sqlx::query_as(
            "SELECT AVG(rating)::FLOAT8, COUNT(*)
             FROM reviews
             WHERE property_id = $1 AND status = $2 AND NOT is_deleted",
        )
        .bind(property_id)
        .bind(REVIEW_APPROVED)
        .fetch_one(pool)
        .await?;

        let summary = RatingSummary::from_aggregate(average, count);
        PropertyRepo::set_rating(pool, property_id, &summary).await?;
        tracing::debug!(
            property_id,
            average_rating = summary.average_rating,
            total_reviews = summary.total_reviews,
            "Property rating recomputed",
        );
        Ok(summary)
    }
}
