pub mod client;
pub mod health;
pub mod procedure;
pub mod quote;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /clients                                  list, create
/// /clients/{id}                             get, update, delete
///
/// /procedures                               list, create
/// /procedures/{id}                          get, update, delete
/// /procedures/{id}/prices                   list tiers (GET or POST)
/// /procedures/{id}/prices/{price_id}        update tier
/// /procedures/{id}/total                    totals with VAT and discount
///
/// /quotes                                   list, create
/// /quotes/{id}                              get, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/clients", client::router())
        // Procedures also nest their price tiers.
        .nest("/procedures", procedure::router())
        .nest("/quotes", quote::router())
}
