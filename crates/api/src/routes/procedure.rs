//! Route definitions for the `/procedures` resource and its price tiers.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{price, procedure};
use crate::state::AppState;

/// Routes mounted at `/procedures`.
///
/// ```text
/// GET    /                          -> list
/// POST   /                          -> create
/// GET    /{id}                      -> get_by_id
/// PUT    /{id}                      -> update
/// DELETE /{id}                      -> delete
///
/// GET    /{id}/prices               -> price::list_by_procedure
/// POST   /{id}/prices               -> price::list_by_procedure
/// PUT    /{id}/prices/{price_id}    -> price::update
///
/// GET    /{id}/total                -> total
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(procedure::list).post(procedure::create))
        .route(
            "/{id}",
            get(procedure::get_by_id)
                .put(procedure::update)
                .delete(procedure::delete),
        )
        .route(
            "/{id}/prices",
            get(price::list_by_procedure).post(price::list_by_procedure),
        )
        .route("/{id}/prices/{price_id}", put(price::update))
        .route("/{id}/total", get(procedure::total))
}
