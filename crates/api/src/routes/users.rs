//! Route definitions for the `/users` and `/admin/users` resources.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{properties, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                    -> create (admin)
/// GET    /me                  -> me
/// GET    /me/favorites        -> list_favorites
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create))
        .route("/me", get(users::me))
        .route("/me/favorites", get(properties::list_favorites))
}

/// Routes mounted at `/admin/users`.
///
/// ```text
/// GET    /                    -> list (?role=&limit=&offset=)
/// GET    /{id}                -> get_by_id
/// DELETE /{id}                -> deactivate
/// PUT    /{id}/role           -> update_role
/// ```
pub fn admin_router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}", get(users::get_by_id).delete(users::deactivate))
        .route("/{id}/role", put(users::update_role))
}
