//! Handlers for property reviews and their moderation.
//!
//! Every write that can change a listing's set of approved reviews is
//! followed by [`ReviewRepo::recompute_property_rating`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::review::validate_review_status;
use realty_core::roles::ROLE_ADMIN;
use realty_core::types::DbId;
use realty_db::models::review::{
    CreateReview, CreateReviewRequest, ModerateReviewRequest, Review, UpdateReviewRequest,
};
use realty_db::repositories::review_repo::ONE_REVIEW_PER_USER_CONSTRAINT;
use realty_db::repositories::{PropertyRepo, ReviewRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::{non_blank, PageParams};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Review",
        id,
    })
}

fn property_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Property",
        id,
    })
}

/// Load a review and check that `user` wrote it or is an admin.
async fn find_authored(state: &AppState, id: DbId, user: &AuthUser, action: &str) -> AppResult<Review> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if review.user_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Only the author or an admin may {action} this review"
        ))));
    }
    Ok(review)
}

/// POST /api/v1/properties/{property_id}/reviews
///
/// New reviews start `pending` and do not count towards the rating until
/// approved.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(property_id): IdPath,
    ValidatedJson(input): ValidatedJson<CreateReviewRequest>,
) -> AppResult<Created<Review>> {
    let property = PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or_else(|| property_not_found(property_id))?;

    let create_dto = CreateReview {
        user_id: user.user_id,
        property_id,
        agent_id: property.agent_id,
        rating: input.rating,
        title: input.title.trim().to_string(),
        comment: input.comment.trim().to_string(),
    };
    let review = ReviewRepo::create(&state.pool, &create_dto)
        .await
        .map_err(|e| match realty_db::unique_violation(&e) {
            Some(ONE_REVIEW_PER_USER_CONSTRAINT) => AppError::Core(CoreError::Conflict(
                "You have already reviewed this property".into(),
            )),
            _ => AppError::Database(e),
        })?;
    ReviewRepo::recompute_property_rating(&state.pool, property_id).await?;

    tracing::info!(review_id = review.id, property_id, user_id = user.user_id, "Review submitted");
    Ok(created(review))
}

/// GET /api/v1/properties/{property_id}/reviews
pub async fn list_for_property(
    State(state): State<AppState>,
    IdPath(property_id): IdPath,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or_else(|| property_not_found(property_id))?;
    let reviews = ReviewRepo::list_approved_for_property(&state.pool, property_id).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// GET /api/v1/reviews/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<Review>>> {
    let review = ReviewRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: review }))
}

/// PUT /api/v1/reviews/{id}
///
/// The author or an admin may edit rating, title or comment. The moderation
/// status is left as is.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateReviewRequest>,
) -> AppResult<Json<DataResponse<Review>>> {
    find_authored(&state, id, &user, "edit").await?;

    let edit = UpdateReviewRequest {
        rating: input.rating,
        title: input.title.map(|t| t.trim().to_string()),
        comment: input.comment.map(|c| c.trim().to_string()),
    };
    let review = ReviewRepo::update(&state.pool, id, &edit)
        .await?
        .ok_or_else(|| not_found(id))?;
    ReviewRepo::recompute_property_rating(&state.pool, review.property_id).await?;

    tracing::info!(review_id = id, user_id = user.user_id, "Review edited");
    Ok(Json(DataResponse { data: review }))
}

/// GET /api/v1/admin/reviews?status=&limit=&offset=
///
/// Every non-deleted review, whatever its moderation status.
pub async fn list_all(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<DataResponse<Vec<Review>>>> {
    let status = non_blank(params.status.as_deref());
    if let Some(status) = status {
        validate_review_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    let reviews = ReviewRepo::list_all(&state.pool, status, params.limit, params.offset).await?;
    Ok(Json(DataResponse { data: reviews }))
}

/// PUT /api/v1/admin/reviews/{id}/status
pub async fn moderate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ModerateReviewRequest>,
) -> AppResult<Json<DataResponse<Review>>> {
    validate_review_status(&input.status)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let review = ReviewRepo::set_status(&state.pool, id, &input.status)
        .await?
        .ok_or_else(|| not_found(id))?;
    let summary = ReviewRepo::recompute_property_rating(&state.pool, review.property_id).await?;

    tracing::info!(
        review_id = id,
        admin_id = admin.user_id,
        status = %review.status,
        average_rating = summary.average_rating,
        "Review moderated",
    );
    Ok(Json(DataResponse { data: review }))
}

/// DELETE /api/v1/reviews/{id}
///
/// The author or an admin may delete a review.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    let review = find_authored(&state, id, &user, "delete").await?;

    ReviewRepo::soft_delete(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ReviewRepo::recompute_property_rating(&state.pool, review.property_id).await?;

    tracing::info!(review_id = id, user_id = user.user_id, "Review deleted");
    Ok(StatusCode::NO_CONTENT)
}
