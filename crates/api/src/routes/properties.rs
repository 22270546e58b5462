//! Route definitions for the `/properties` resource.
//!
//! Also nests the visit, review and contact routes that are scoped to one listing
//! under `/properties/{id}/...`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{contact, properties, reviews, visits};
use crate::state::AppState;

/// Routes mounted at `/properties`.
///
/// ```text
/// GET    /                                  -> list
/// POST   /                                  -> create (agent/admin)
/// GET    /{id}                              -> get_by_id
/// PUT    /{id}                              -> update (owning agent/admin)
/// DELETE /{id}                              -> delete (owning agent/admin)
/// PUT    /{id}/favorite                     -> favorite
/// PUT    /{id}/unfavorite                   -> unfavorite
/// POST   /{id}/contact                      -> contact::send
///
/// GET    /{id}/available-slots              -> available_slots_for_property (?date=)
/// POST   /{id}/visits                       -> request_visit
///
/// GET    /{id}/reviews                      -> list_for_property
/// POST   /{id}/reviews                      -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(properties::list).post(properties::create))
        .route(
            "/{id}",
            get(properties::get_by_id)
                .put(properties::update)
                .delete(properties::delete),
        )
        .route("/{id}/favorite", put(properties::favorite))
        .route("/{id}/unfavorite", put(properties::unfavorite))
        .route("/{id}/contact", post(contact::send))
        .route(
            "/{id}/available-slots",
            get(visits::available_slots_for_property),
        )
        .route("/{id}/visits", post(visits::request_visit))
        .route(
            "/{id}/reviews",
            get(reviews::list_for_property).post(reviews::create),
        )
}
