//! Handlers for property visits: availability, booking, and the visit
//! lifecycle.
//!
//! Booking never checks for a free slot before inserting. The insert is
//! attempted and the database's unique indexes decide; their violations are
//! translated to `CONFLICT` responses here. Status changes validate against
//! the state machine, then apply as a conditional update so a concurrent
//! change is reported instead of overwritten.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use realty_core::booking::status::{
    validate_agent_decision, validate_cancellation, validate_transition,
};
use realty_core::booking::{available_slots, clock, VisitStatus};
use realty_core::error::CoreError;
use realty_core::types::DbId;
use realty_db::models::visit::{
    normalize_text, CancelVisitBody, CreateVisit, RequestVisitBody, UpdateVisitStatusBody, Visit,
};
use realty_db::repositories::{BookingConflict, PropertyRepo, VisitRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAgent;
use crate::query::{non_blank, DateQuery, SlotQuery, StatusFilter};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

/// Free start times for one property on one day.
#[derive(Debug, Serialize)]
pub struct AvailableSlots {
    pub property_id: DbId,
    pub date: NaiveDate,
    /// `HH:MM` start times in ascending order.
    pub slots: Vec<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Visit", id })
}

fn parse_date(raw: Option<&str>) -> AppResult<NaiveDate> {
    let raw = non_blank(raw)
        .ok_or_else(|| AppError::Core(CoreError::Validation("Date is required".into())))?;
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "Invalid date '{raw}'. Expected YYYY-MM-DD"
        )))
    })
}

fn parse_property_id(raw: Option<&str>) -> AppResult<DbId> {
    let raw = non_blank(raw)
        .ok_or_else(|| AppError::Core(CoreError::Validation("Property ID is required".into())))?;
    raw.parse().map_err(|_| {
        AppError::Core(CoreError::Validation(format!("Invalid property ID '{raw}'")))
    })
}

async fn compute_slots(
    state: &AppState,
    property_id: DbId,
    date: NaiveDate,
) -> AppResult<AvailableSlots> {
    let booked = VisitRepo::active_intervals(&state.pool, property_id, date).await?;
    let slots = available_slots(&state.config.booking, &booked)
        .into_iter()
        .map(clock::format)
        .collect();
    Ok(AvailableSlots {
        property_id,
        date,
        slots,
    })
}

/// Build the error for a conditional update that matched no row.
///
/// The visit was read in an allowed status moments earlier, so either it was
/// deleted or another request moved it first.
async fn lost_race(state: &AppState, id: DbId, user_id: DbId, to: VisitStatus) -> AppError {
    match VisitRepo::find_for_participant(&state.pool, id, user_id).await {
        Ok(Some(current)) => {
            if current.status.is_terminal() {
                tracing::warn!(
                    visit_id = id,
                    current = %current.status,
                    requested = %to,
                    "Visit was closed concurrently",
                );
            } else {
                tracing::warn!(
                    visit_id = id,
                    current = %current.status,
                    requested = %to,
                    "Visit changed status concurrently",
                );
            }
            AppError::Core(CoreError::InvalidTransition {
                from: current.status.to_string(),
                to: to.to_string(),
            })
        }
        Ok(None) => not_found(id),
        Err(e) => AppError::Database(e),
    }
}

// ---------------------------------------------------------------------------
// Availability
// ---------------------------------------------------------------------------

/// GET /api/v1/visits/available-slots?propertyId=&date=
///
/// `property_id` is accepted as well.
pub async fn available_slots_by_query(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SlotQuery>,
) -> AppResult<Json<DataResponse<AvailableSlots>>> {
    let property_id = parse_property_id(params.property_id.as_deref())?;
    let date = parse_date(params.date.as_deref())?;
    let data = compute_slots(&state, property_id, date).await?;
    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/properties/{property_id}/available-slots?date=
pub async fn available_slots_for_property(
    State(state): State<AppState>,
    IdPath(property_id): IdPath,
    QueryParams(params): QueryParams<DateQuery>,
) -> AppResult<Json<DataResponse<AvailableSlots>>> {
    let date = parse_date(params.date.as_deref())?;
    let data = compute_slots(&state, property_id, date).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// POST /api/v1/properties/{property_id}/visits
///
/// Request a visit. The new visit is `pending` and assigned to the listing's
/// agent.
pub async fn request_visit(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(property_id): IdPath,
    ValidatedJson(body): ValidatedJson<RequestVisitBody>,
) -> AppResult<Created<Visit>> {
    let hours = &state.config.booking;
    if !hours.admits(body.visit_time) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Visit time must be a whole minute between {} and {}",
            clock::format(hours.open()),
            clock::format(hours.close()),
        ))));
    }

    let property = PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id: property_id,
        }))?;

    let input = CreateVisit {
        property_id,
        agent_id: property.agent_id,
        visitor_id: user.user_id,
        visit_date: body.visit_date,
        visit_time: body.visit_time,
        duration_minutes: body.duration_minutes,
        notes: normalize_text(body.notes),
    };

    let visit = match VisitRepo::create(&state.pool, &input).await {
        Ok(visit) => visit,
        Err(err) => {
            return Err(match BookingConflict::from_error(&err) {
                Some(conflict) => {
                    tracing::info!(
                        property_id,
                        user_id = user.user_id,
                        date = %input.visit_date,
                        time = %clock::format(input.visit_time),
                        ?conflict,
                        "Visit request rejected",
                    );
                    AppError::Core(CoreError::Conflict(conflict.message().into()))
                }
                None => AppError::Database(err),
            });
        }
    };

    tracing::info!(
        visit_id = visit.id,
        property_id,
        user_id = user.user_id,
        agent_id = visit.agent_id,
        "Visit requested",
    );
    Ok(created(visit))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/visits?status=
///
/// Visits the caller requested or is the agent for, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(params): QueryParams<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<Visit>>>> {
    let status = non_blank(params.status.as_deref())
        .map(str::parse::<VisitStatus>)
        .transpose()?;
    let visits = VisitRepo::list_for_participant(&state.pool, user.user_id, status).await?;
    Ok(Json(DataResponse { data: visits }))
}

/// GET /api/v1/visits/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<Visit>>> {
    let visit = VisitRepo::find_for_participant(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: visit }))
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// PUT /api/v1/visits/{id}/status
///
/// The listing agent decides on a pending visit: `approved`, `rejected` or
/// `cancelled`.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<UpdateVisitStatusBody>,
) -> AppResult<Json<DataResponse<Visit>>> {
    let requested: VisitStatus = body.status.trim().parse()?;

    let visit = VisitRepo::find_for_agent(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_agent_decision(visit.status, requested)?;

    let reason = normalize_text(body.cancellation_reason);
    let updated = match VisitRepo::transition(
        &state.pool,
        id,
        &[VisitStatus::Pending],
        requested,
        reason.as_deref(),
    )
    .await?
    {
        Some(updated) => updated,
        None => return Err(lost_race(&state, id, user.user_id, requested).await),
    };

    tracing::info!(
        visit_id = id,
        user_id = user.user_id,
        from = %visit.status,
        to = %updated.status,
        "Visit status updated",
    );
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/visits/{id}/cancel
///
/// The visitor withdraws a pending or approved visit.
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(body): ValidatedJson<CancelVisitBody>,
) -> AppResult<Json<DataResponse<Visit>>> {
    let visit = VisitRepo::find_for_visitor(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_cancellation(visit.status)?;

    let reason = normalize_text(body.cancellation_reason);
    let updated = match VisitRepo::transition(
        &state.pool,
        id,
        &VisitStatus::sources_of(VisitStatus::Cancelled),
        VisitStatus::Cancelled,
        reason.as_deref(),
    )
    .await?
    {
        Some(updated) => updated,
        None => return Err(lost_race(&state, id, user.user_id, VisitStatus::Cancelled).await),
    };

    tracing::info!(
        visit_id = id,
        user_id = user.user_id,
        from = %visit.status,
        "Visit cancelled",
    );
    Ok(Json(DataResponse { data: updated }))
}

/// PUT /api/v1/visits/{id}/complete
///
/// The listing agent marks an approved visit as having taken place.
pub async fn complete(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<Visit>>> {
    let visit = VisitRepo::find_for_agent(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_transition(visit.status, VisitStatus::Completed)?;

    let updated = match VisitRepo::transition(
        &state.pool,
        id,
        &VisitStatus::sources_of(VisitStatus::Completed),
        VisitStatus::Completed,
        None,
    )
    .await?
    {
        Some(updated) => updated,
        None => return Err(lost_race(&state, id, user.user_id, VisitStatus::Completed).await),
    };

    tracing::info!(visit_id = id, user_id = user.user_id, "Visit completed");
    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/visits/{id}
///
/// Hides the visit from both participants and releases its slot.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    let deleted = VisitRepo::soft_delete_for_participant(&state.pool, id, user.user_id).await?;
    if deleted {
        tracing::info!(visit_id = id, user_id = user.user_id, "Visit deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
