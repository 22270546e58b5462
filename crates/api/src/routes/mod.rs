pub mod contact;
pub mod health;
pub mod properties;
pub mod reviews;
pub mod users;
pub mod visits;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                     register (admin)
/// /users/me                                  current user
/// /users/me/favorites                        favorited listings
///
/// /properties                                list, create
/// /properties/{id}                           get, update, delete
/// /properties/{id}/favorite                  add to favorites
/// /properties/{id}/unfavorite                remove from favorites
/// /properties/{id}/contact                   message the listing agent
/// /properties/{id}/available-slots           free start times for ?date=
/// /properties/{id}/visits                    request a visit
/// /properties/{id}/reviews                   list approved, submit
///
/// /visits                                    list own visits (?status=)
/// /visits/available-slots                    free start times (?propertyId=&date=)
/// /visits/{id}                               get, delete
/// /visits/{id}/status                        agent decision
/// /visits/{id}/cancel                        visitor cancellation
/// /visits/{id}/complete                      mark completed
///
/// /reviews/{id}                              get, edit, delete
///
/// /contact                                   own messages (?status=)
/// /contact/{id}                              thread, delete
/// /contact/{id}/reply                        reply
/// /contact/{id}/status                       receiver sets status
///
/// /admin/users                               list (admin)
/// /admin/users/{id}                          get, deactivate (admin)
/// /admin/users/{id}/role                     change role (admin)
/// /admin/reviews                             list all (admin)
/// /admin/reviews/{id}/status                 moderate (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/properties", properties::router())
        .nest("/visits", visits::router())
        .nest("/reviews", reviews::router())
        .nest("/contact", contact::router())
        .nest("/admin/users", users::admin_router())
        .nest("/admin/reviews", reviews::admin_router())
}
