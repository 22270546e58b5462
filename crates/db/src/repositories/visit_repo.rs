//! Repository for the `visits` table.
//!
//! Booking conflicts are decided by two partial unique indexes, not by
//! reading before writing:
//!
//! - `uq_visits_pending_per_visitor` -- one pending request per visitor and property
//! - `uq_visits_active_slot` -- one pending/approved booking per property, date and start time
//!
//! Status changes are conditional `UPDATE`s that only match rows still in an
//! allowed source status, so a concurrent transition cannot be overwritten.

use chrono::NaiveDate;
use realty_core::booking::{BookedInterval, VisitStatus};
use realty_core::types::DbId;
use sqlx::PgPool;

use crate::models::visit::{BookedSlot, CreateVisit, Visit};
use crate::unique_violation;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, property_id, agent_id, visitor_id, visit_date, visit_time, \
    duration_minutes, status, notes, cancellation_reason, is_deleted, created_at, updated_at";

/// Unique index guarding one pending request per visitor and property.
pub const PENDING_PER_VISITOR_INDEX: &str = "uq_visits_pending_per_visitor";

/// Unique index guarding one active booking per property start slot.
pub const ACTIVE_SLOT_INDEX: &str = "uq_visits_active_slot";

/// Which booking guard rejected an insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingConflict {
    /// The visitor already has a pending request for this property.
    DuplicatePending,
    /// Another active booking already starts at this date and time.
    SlotTaken,
}

impl BookingConflict {
    /// Classify an insert error. Returns `None` for anything that is not a
    /// violation of one of the booking guards.
    pub fn from_error(err: &sqlx::Error) -> Option<Self> {
        match unique_violation(err)? {
            PENDING_PER_VISITOR_INDEX => Some(Self::DuplicatePending),
            ACTIVE_SLOT_INDEX => Some(Self::SlotTaken),
            _ => None,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::DuplicatePending => "You already have a pending visit request for this property",
            Self::SlotTaken => "This time slot is already booked",
        }
    }
}

fn status_names(statuses: &[VisitStatus]) -> Vec<String> {
    statuses.iter().map(|s| s.as_str().to_string()).collect()
}

/// Provides booking and lifecycle operations for visits.
pub struct VisitRepo;

impl VisitRepo {
    /// Insert a new pending visit, returning the created row.
    ///
    /// Fails with a unique violation (see [`BookingConflict::from_error`])
    /// when either booking guard rejects the row.
    pub async fn create(pool: &PgPool, input: &CreateVisit) -> Result<Visit, sqlx::Error> {
        let query = format!(
            "INSERT INTO visits
                (property_id, agent_id, visitor_id, visit_date, visit_time, duration_minutes, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(input.property_id)
            .bind(input.agent_id)
            .bind(input.visitor_id)
            .bind(input.visit_date)
            .bind(input.visit_time)
            .bind(input.duration_minutes)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find a non-deleted visit where `user_id` is the visitor or the agent.
    pub async fn find_for_participant(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits
             WHERE id = $1 AND (visitor_id = $2 OR agent_id = $2) AND NOT is_deleted"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted visit assigned to `agent_id`.
    pub async fn find_for_agent(
        pool: &PgPool,
        id: DbId,
        agent_id: DbId,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits WHERE id = $1 AND agent_id = $2 AND NOT is_deleted"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(agent_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a non-deleted visit requested by `visitor_id`.
    pub async fn find_for_visitor(
        pool: &PgPool,
        id: DbId,
        visitor_id: DbId,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits WHERE id = $1 AND visitor_id = $2 AND NOT is_deleted"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(visitor_id)
            .fetch_optional(pool)
            .await
    }

    /// List non-deleted visits where `user_id` is the visitor or the agent,
    /// newest first, optionally restricted to one status.
    pub async fn list_for_participant(
        pool: &PgPool,
        user_id: DbId,
        status: Option<VisitStatus>,
    ) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits
             WHERE (visitor_id = $1 OR agent_id = $1)
               AND NOT is_deleted
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(user_id)
            .bind(status.map(VisitStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Occupied intervals of the active bookings on a property for one day.
    pub async fn active_intervals(
        pool: &PgPool,
        property_id: DbId,
        visit_date: NaiveDate,
    ) -> Result<Vec<BookedInterval>, sqlx::Error> {
        let rows = sqlx::query_as::<_, BookedSlot>(
            "SELECT visit_time, duration_minutes FROM visits
             WHERE property_id = $1
               AND visit_date = $2
               AND status = ANY($3)
               AND NOT is_deleted
             ORDER BY visit_time ASC",
        )
        .bind(property_id)
        .bind(visit_date)
        .bind(status_names(realty_core::booking::status::ACTIVE_STATUSES))
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                BookedInterval::new(row.visit_time, u32::try_from(row.duration_minutes).unwrap_or(0))
            })
            .collect())
    }

    /// Move a visit to `to`, provided it is still in one of `from`.
    ///
    /// `cancellation_reason` is written only when `to` is `cancelled`.
    /// Returns `None` if the visit is missing, deleted, or no longer in an
    /// allowed source status.
    pub async fn transition(
        pool: &PgPool,
        id: DbId,
        from: &[VisitStatus],
        to: VisitStatus,
        cancellation_reason: Option<&str>,
    ) -> Result<Option<Visit>, sqlx::Error> {
        let reason = if to == VisitStatus::Cancelled {
            cancellation_reason
        } else {
            None
        };
        let query = format!(
            "UPDATE visits SET
                status = $2,
                cancellation_reason = COALESCE($4, cancellation_reason)
             WHERE id = $1 AND NOT is_deleted AND status = ANY($3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(id)
            .bind(to.as_str())
            .bind(status_names(from))
            .bind(reason)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a visit the user takes part in. Returns `true` if a row
    /// was marked deleted.
    pub async fn soft_delete_for_participant(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE visits SET is_deleted = true
             WHERE id = $1 AND (visitor_id = $2 OR agent_id = $2) AND NOT is_deleted",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
