//! Handlers for buyer-to-agent contact messages.
//!
//! A message is visible only to its two participants. Anyone else gets the
//! same 404 as for a missing message.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use realty_core::contact::{marks_read_on_view, validate_contact_status};
use realty_core::error::CoreError;
use realty_core::types::DbId;
use realty_db::models::contact::{
    Contact, ContactReply, ContactThread, CreateContact, ReplyRequest, SendMessageRequest,
    UpdateContactStatusRequest,
};
use realty_db::repositories::contact_repo::ONE_MESSAGE_PER_PROPERTY_CONSTRAINT;
use realty_db::repositories::{ContactRepo, PropertyRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{IdPath, QueryParams, ValidatedJson};
use crate::middleware::auth::AuthUser;
use crate::query::{non_blank, StatusFilter};
use crate::response::{created, Created, DataResponse};
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Message",
        id,
    })
}

/// POST /api/v1/properties/{id}/contact
///
/// Send a message to the listing's agent. One message per sender and
/// listing; further exchanges go through replies.
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(property_id): IdPath,
    ValidatedJson(input): ValidatedJson<SendMessageRequest>,
) -> AppResult<Created<Contact>> {
    let property = PropertyRepo::find_by_id(&state.pool, property_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Property",
            id: property_id,
        }))?;

    let create_dto = CreateContact {
        sender_id: user.user_id,
        receiver_id: property.agent_id,
        property_id,
        subject: input.subject.trim().to_string(),
        message: input.message.trim().to_string(),
    };
    let contact = ContactRepo::create(&state.pool, &create_dto)
        .await
        .map_err(|e| match realty_db::unique_violation(&e) {
            Some(ONE_MESSAGE_PER_PROPERTY_CONSTRAINT) => AppError::Core(CoreError::Conflict(
                "You have already sent a message for this property".into(),
            )),
            _ => AppError::Database(e),
        })?;

    tracing::info!(
        contact_id = contact.id,
        property_id,
        sender_id = user.user_id,
        receiver_id = contact.receiver_id,
        "Message sent",
    );
    Ok(created(contact))
}

/// GET /api/v1/contact?status=
///
/// Messages the caller sent or received, newest first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    QueryParams(filter): QueryParams<StatusFilter>,
) -> AppResult<Json<DataResponse<Vec<Contact>>>> {
    let status = non_blank(filter.status.as_deref());
    if let Some(status) = status {
        validate_contact_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;
    }
    let contacts = ContactRepo::list_for_participant(&state.pool, user.user_id, status).await?;
    Ok(Json(DataResponse { data: contacts }))
}

/// GET /api/v1/contact/{id}
///
/// Returns the message with its replies. The receiver opening an unread
/// message marks it `read`.
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<Json<DataResponse<ContactThread>>> {
    let mut contact = ContactRepo::find_for_participant(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    if marks_read_on_view(contact.receiver_id == user.user_id, &contact.status) {
        // A concurrent reply may already have moved it past `unread`.
        if let Some(read) = ContactRepo::mark_read(&state.pool, id, user.user_id).await? {
            tracing::debug!(contact_id = id, "Message marked read");
            contact = read;
        }
    }

    let replies = ContactRepo::list_replies(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: ContactThread { contact, replies },
    }))
}

/// POST /api/v1/contact/{id}/reply
pub async fn reply(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<ReplyRequest>,
) -> AppResult<Created<ContactReply>> {
    ContactRepo::find_for_participant(&state.pool, id, user.user_id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let reply = ContactRepo::add_reply(&state.pool, id, user.user_id, input.message.trim()).await?;

    tracing::info!(contact_id = id, reply_id = reply.id, sender_id = user.user_id, "Message replied");
    Ok(created(reply))
}

/// PUT /api/v1/contact/{id}/status
///
/// Only the receiver may change a message's status.
pub async fn update_status(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateContactStatusRequest>,
) -> AppResult<Json<DataResponse<Contact>>> {
    let status = input.status.trim();
    validate_contact_status(status).map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let contact = ContactRepo::set_status_for_receiver(&state.pool, id, user.user_id, status)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(contact_id = id, status = %contact.status, "Message status updated");
    Ok(Json(DataResponse { data: contact }))
}

/// DELETE /api/v1/contact/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    IdPath(id): IdPath,
) -> AppResult<StatusCode> {
    if ContactRepo::soft_delete_for_participant(&state.pool, id, user.user_id).await? {
        tracing::info!(contact_id = id, user_id = user.user_id, "Message deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
