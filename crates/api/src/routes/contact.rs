//! Route definitions for the `/contact` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::contact;
use crate::state::AppState;

/// Routes mounted at `/contact`.
///
/// ```text
/// GET    /                    -> list (?status=)
/// GET    /{id}                -> get_by_id (marks read for the receiver)
/// DELETE /{id}                -> delete (participant)
/// POST   /{id}/reply          -> reply (participant)
/// PUT    /{id}/status         -> update_status (receiver)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(contact::list))
        .route("/{id}", get(contact::get_by_id).delete(contact::delete))
        .route("/{id}/reply", post(contact::reply))
        .route("/{id}/status", put(contact::update_status))
}
