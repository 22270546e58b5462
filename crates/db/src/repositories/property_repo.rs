//! Repository for the `properties` table.

use realty_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use realty_core::review::RatingSummary;
use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::property::{CreateProperty, Property, PropertyFilter, UpdateProperty};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, agent_id, title, description, price, city, property_type, \
    listing_type, status, image_urls, average_rating, total_reviews, is_deleted, \
    created_at, updated_at";

/// Primary key of `property_favorites`; violated by a repeat favorite.
pub const FAVORITE_CONSTRAINT: &str = "uq_favorites_user_property";

/// Provides CRUD operations for property listings.
pub struct PropertyRepo;

impl PropertyRepo {
    /// Insert a new listing without images, returning the created row.
    ///
    /// Omitted `property_type` / `listing_type` fall back to the column
    /// defaults (`apartment`, `sale`).
    pub async fn create(pool: &PgPool, input: &CreateProperty) -> Result<Property, sqlx::Error> {
        let query = format!(
            "INSERT INTO properties
                (agent_id, title, description, price, city, property_type, listing_type)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'apartment'), COALESCE($7, 'sale'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(input.agent_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.city)
            .bind(&input.property_type)
            .bind(&input.listing_type)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted listing by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Property>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM properties WHERE id = $1 AND NOT is_deleted");
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted listings, newest first.
    pub async fn list(pool: &PgPool, filter: &PropertyFilter) -> Result<Vec<Property>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             WHERE NOT is_deleted
               AND ($1::TEXT IS NULL OR LOWER(city) = LOWER($1))
               AND ($2::TEXT IS NULL OR listing_type = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(&filter.city)
            .bind(&filter.listing_type)
            .bind(&filter.status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Apply a partial update. `None` fields keep their stored value.
    ///
    /// Returns `None` if the listing does not exist or is deleted.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProperty,
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                city = COALESCE($5, city),
                property_type = COALESCE($6, property_type),
                listing_type = COALESCE($7, listing_type),
                status = COALESCE($8, status),
                image_urls = COALESCE($9, image_urls)
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.city)
            .bind(&input.property_type)
            .bind(&input.listing_type)
            .bind(&input.status)
            .bind(&input.image_urls)
            .fetch_optional(pool)
            .await
    }

    /// Replace the listing's image URLs.
    pub async fn set_image_urls(
        pool: &PgPool,
        id: DbId,
        image_urls: &[String],
    ) -> Result<Option<Property>, sqlx::Error> {
        let query = format!(
            "UPDATE properties SET image_urls = $2
             WHERE id = $1 AND NOT is_deleted
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(id)
            .bind(image_urls)
            .fetch_optional(pool)
            .await
    }

    /// Store a freshly computed rating summary on the listing.
    pub async fn set_rating(
        pool: &PgPool,
        id: DbId,
        summary: &RatingSummary,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE properties SET average_rating = $2, total_reviews = $3 WHERE id = $1")
            .bind(id)
            .bind(summary.average_rating)
            .bind(summary.total_reviews)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Soft-delete a listing. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE properties SET is_deleted = true WHERE id = $1 AND NOT is_deleted")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Record that `user_id` favorited the listing.
    ///
    /// A second call for the same pair fails with a unique violation on
    /// [`FAVORITE_CONSTRAINT`].
    pub async fn add_favorite(
        pool: &PgPool,
        user_id: DbId,
        property_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO property_favorites (user_id, property_id) VALUES ($1, $2)")
            .bind(user_id)
            .bind(property_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a favorite. Returns `true` if one existed.
    pub async fn remove_favorite(
        pool: &PgPool,
        user_id: DbId,
        property_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM property_favorites WHERE user_id = $1 AND property_id = $2")
                .bind(user_id)
                .bind(property_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of users who favorited the listing.
    pub async fn favorites_count(pool: &PgPool, property_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM property_favorites WHERE property_id = $1")
            .bind(property_id)
            .fetch_one(pool)
            .await
    }

    /// Non-deleted listings favorited by `user_id`, most recently favorited first.
    pub async fn list_favorites(pool: &PgPool, user_id: DbId) -> Result<Vec<Property>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM properties
             JOIN (SELECT property_id, created_at AS favorited_at
                   FROM property_favorites WHERE user_id = $1) f
               ON f.property_id = properties.id
             WHERE NOT is_deleted
             ORDER BY f.favorited_at DESC, properties.id DESC"
        );
        sqlx::query_as::<_, Property>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }
}
