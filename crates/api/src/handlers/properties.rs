//! Handlers for the `/properties` resource.
//!
//! Listing images go through the configured [`MediaUploader`] after the
//! listing row is committed. An upload failure keeps the listing and reports
//! `created_without_media` rather than failing the request.
//!
//! [`MediaUploader`]: realty_core::listing::MediaUploader

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realty_core::error::CoreError;
use realty_core::listing::{
    validate_listing_status, validate_listing_type, validate_property_type, ListingOutcome,
};
use realty_core::roles::ROLE_ADMIN;
use realty_core::types::DbId;
use realty_db::models::property::{
    CreateProperty, CreatePropertyRequest, FavoriteState, Property, PropertyFilter,
    UpdateProperty, UpdatePropertyRequest,
};
use realty_db::repositories::property_repo::FAVORITE_CONSTRAINT;
use realty_db::repositories::PropertyRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAgent;
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Property",
        id,
    })
}

fn validation(msg: String) -> AppError {
    AppError::Core(CoreError::Validation(msg))
}

/// Load a listing and check that `user` owns it or is an admin.
async fn find_owned(state: &AppState, id: DbId, user: &AuthUser, action: &str) -> AppResult<Property> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if property.agent_id != user.user_id && user.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(format!(
            "Only the listing agent or an admin may {action} this property"
        ))));
    }
    Ok(property)
}

/// GET /api/v1/properties?city=&listing_type=&status=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<PropertyFilter>,
) -> AppResult<Json<DataResponse<Vec<Property>>>> {
    let properties = PropertyRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: properties }))
}

/// GET /api/v1/properties/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<Property>>> {
    let property = PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse { data: property }))
}

/// POST /api/v1/properties
///
/// Create a listing owned by the calling agent. Returns 201 with a
/// [`ListingOutcome`] describing whether images were attached.
pub async fn create(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    ValidatedJson(input): ValidatedJson<CreatePropertyRequest>,
) -> AppResult<Created<ListingOutcome<Property>>> {
    if let Some(property_type) = input.property_type.as_deref() {
        validate_property_type(property_type).map_err(validation)?;
    }
    if let Some(listing_type) = input.listing_type.as_deref() {
        validate_listing_type(listing_type).map_err(validation)?;
    }

    let create_dto = CreateProperty {
        agent_id: user.user_id,
        title: input.title.trim().to_string(),
        description: input.description,
        price: input.price,
        city: input.city.trim().to_string(),
        property_type: input.property_type,
        listing_type: input.listing_type,
    };
    let property = PropertyRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(property_id = property.id, agent_id = user.user_id, "Property created");

    let outcome = if input.image_urls.is_empty() {
        ListingOutcome::Created { listing: property }
    } else {
        match state.media.upload(&input.image_urls).await {
            Ok(urls) => {
                // The row was inserted above, so a miss here means it vanished mid-request.
                let listing = PropertyRepo::set_image_urls(&state.pool, property.id, &urls)
                    .await?
                    .ok_or_else(|| {
                        AppError::Core(CoreError::Internal(format!(
                            "property {} disappeared before its images were stored",
                            property.id
                        )))
                    })?;
                tracing::info!(
                    property_id = listing.id,
                    images = urls.len(),
                    uploader = state.media.name(),
                    "Property images attached",
                );
                ListingOutcome::Created { listing }
            }
            Err(e) => {
                tracing::warn!(
                    property_id = property.id,
                    uploader = state.media.name(),
                    error = %e,
                    "Property created without images",
                );
                ListingOutcome::CreatedWithoutMedia {
                    listing: property,
                    reason: e.to_string(),
                }
            }
        }
    };

    Ok(created(outcome))
}

/// PUT /api/v1/properties/{id}
///
/// Partial update by the owning agent or an admin. Replacement images are
/// uploaded before the row is written; an upload failure rejects the whole
/// update.
pub async fn update(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdatePropertyRequest>,
) -> AppResult<Json<DataResponse<Property>>> {
    if let Some(property_type) = input.property_type.as_deref() {
        validate_property_type(property_type).map_err(validation)?;
    }
    if let Some(listing_type) = input.listing_type.as_deref() {
        validate_listing_type(listing_type).map_err(validation)?;
    }
    if let Some(status) = input.status.as_deref() {
        validate_listing_status(status).map_err(validation)?;
    }

    find_owned(&state, id, &user, "update").await?;

    let image_urls = match input.image_urls {
        Some(sources) if !sources.is_empty() => Some(
            state
                .media
                .upload(&sources)
                .await
                .map_err(|e| validation(e.to_string()))?,
        ),
        other => other,
    };

    let update_dto = UpdateProperty {
        title: input.title.map(|t| t.trim().to_string()),
        description: input.description,
        price: input.price,
        city: input.city.map(|c| c.trim().to_string()),
        property_type: input.property_type,
        listing_type: input.listing_type,
        status: input.status,
        image_urls,
    };
    let property = PropertyRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(property_id = id, user_id = user.user_id, status = %property.status, "Property updated");
    Ok(Json(DataResponse { data: property }))
}

/// DELETE /api/v1/properties/{id}
///
/// Only the owning agent or an admin may delete a listing.
pub async fn delete(
    State(state): State<AppState>,
    RequireAgent(user): RequireAgent,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    find_owned(&state, id, &user, "delete").await?;

    if PropertyRepo::soft_delete(&state.pool, id).await? {
        tracing::info!(property_id = id, user_id = user.user_id, "Property deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// PUT /api/v1/properties/{id}/favorite
pub async fn favorite(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<FavoriteState>>> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    PropertyRepo::add_favorite(&state.pool, user.user_id, id)
        .await
        .map_err(|e| match realty_db::unique_violation(&e) {
            Some(FAVORITE_CONSTRAINT) => {
                AppError::Core(CoreError::Conflict("Property already in favorites".into()))
            }
            _ => AppError::Database(e),
        })?;

    let favorites_count = PropertyRepo::favorites_count(&state.pool, id).await?;
    tracing::debug!(property_id = id, user_id = user.user_id, "Property favorited");
    Ok(Json(DataResponse {
        data: FavoriteState {
            property_id: id,
            favorited: true,
            favorites_count,
        },
    }))
}

/// PUT /api/v1/properties/{id}/unfavorite
pub async fn unfavorite(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<FavoriteState>>> {
    PropertyRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if !PropertyRepo::remove_favorite(&state.pool, user.user_id, id).await? {
        return Err(validation("Property not in favorites".into()));
    }

    let favorites_count = PropertyRepo::favorites_count(&state.pool, id).await?;
    tracing::debug!(property_id = id, user_id = user.user_id, "Property unfavorited");
    Ok(Json(DataResponse {
        data: FavoriteState {
            property_id: id,
            favorited: false,
            favorites_count,
        },
    }))
}

/// GET /api/v1/users/me/favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Property>>>> {
    let properties = PropertyRepo::list_favorites(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: properties }))
}
