//! Route definitions for review management outside a listing's scope.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::reviews;
use crate::state::AppState;

/// Routes mounted at `/reviews`.
///
/// ```text
/// GET    /{id}                -> get_by_id
/// PUT    /{id}                -> update (author/admin)
/// DELETE /{id}                -> delete (author/admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(reviews::get_by_id)
            .put(reviews::update)
            .delete(reviews::delete),
    )
}

/// Routes mounted at `/admin/reviews`.
///
/// ```text
/// GET    /                    -> list_all (?status=&limit=&offset=)
/// PUT    /{id}/status         -> moderate
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reviews::list_all))
        .route("/{id}/status", put(reviews::moderate))
}
