//! Handlers for price tiers nested under `/procedures/{id}/prices`.

use axum::extract::State;
use axum::Json;
use quotedesk_core::schema::PriceInput;
use quotedesk_core::types::DbId;
use quotedesk_db::models::price::Price;
use quotedesk_db::repositories::PriceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidatedJson};
use crate::state::AppState;

/// GET or POST /api/v1/procedures/{id}/prices
///
/// Lists the tiers of one procedure. An unknown procedure yields an empty
/// list; a malformed id is rejected with 400 by the path extractor.
pub async fn list_by_procedure(
    State(state): State<AppState>,
    AppPath(procedure_id): AppPath<DbId>,
) -> AppResult<Json<Vec<Price>>> {
    let prices = PriceRepo::list_by_procedure(&state.pool, procedure_id).await?;
    Ok(Json(prices))
}

/// PUT /api/v1/procedures/{id}/prices/{price_id}
///
/// Quotes already issued against this tier keep their amount snapshot.
pub async fn update(
    State(state): State<AppState>,
    AppPath((procedure_id, id)): AppPath<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<PriceInput>,
) -> AppResult<Json<Price>> {
    let mut tx = state.pool.begin().await?;
    let price = PriceRepo::update(&mut *tx, procedure_id, id, &input)
        .await?
        .ok_or(AppError::not_found("Price", id))?;
    tx.commit().await?;

    tracing::info!(%procedure_id, price_id = %id, "Price updated");
    Ok(Json(price))
}
