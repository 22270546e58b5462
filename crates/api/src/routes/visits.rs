//! Route definitions for the `/visits` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::visits;
use crate::state::AppState;

/// Routes mounted at `/visits`.
///
/// ```text
/// GET    /                    -> list (?status=)
/// GET    /available-slots     -> available_slots_by_query (?propertyId=&date=)
/// GET    /{id}                -> get_by_id
/// DELETE /{id}                -> delete
/// PUT    /{id}/status         -> update_status (agent/admin)
/// PUT    /{id}/cancel         -> cancel (visitor)
/// PUT    /{id}/complete       -> complete (agent/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(visits::list))
        .route("/available-slots", get(visits::available_slots_by_query))
        .route("/{id}", get(visits::get_by_id).delete(visits::delete))
        .route("/{id}/status", put(visits::update_status))
        .route("/{id}/cancel", put(visits::cancel))
        .route("/{id}/complete", put(visits::complete))
}
