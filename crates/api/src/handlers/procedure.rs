//! Handlers for the `/procedures` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use serde::Deserialize;
use quotedesk_core::pricing::{procedure_total, ProcedureTotal};
use quotedesk_core::schema::{check_discount, ProcedureInput, UpdateProcedure};
use quotedesk_core::types::{new_id, DbId};
use quotedesk_db::models::procedure::ProcedureWithPrices;
use quotedesk_db::repositories::{PriceRepo, ProcedureRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, AppQuery, ValidatedJson};
use crate::response::DeletedResponse;
use crate::state::AppState;

/// POST /api/v1/procedures
///
/// Writes the procedure and all of its prices in one transaction.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ProcedureInput>,
) -> AppResult<(StatusCode, Json<ProcedureWithPrices>)> {
    let mut tx = state.pool.begin().await?;
    let procedure = ProcedureRepo::create(&mut *tx, new_id(), &input).await?;
    tx.commit().await?;

    tracing::info!(
        procedure_id = %procedure.procedure.id,
        price_count = procedure.prices.len(),
        "Procedure created",
    );
    Ok((StatusCode::CREATED, Json(procedure)))
}

/// GET /api/v1/procedures
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ProcedureWithPrices>>> {
    let procedures = ProcedureRepo::list_with_prices(&state.pool).await?;
    Ok(Json(procedures))
}

/// GET /api/v1/procedures/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<ProcedureWithPrices>> {
    let procedure = ProcedureRepo::find_by_id_with_prices(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Procedure", id))?;
    Ok(Json(procedure))
}

/// PUT /api/v1/procedures/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateProcedure>,
) -> AppResult<Json<ProcedureWithPrices>> {
    let mut tx = state.pool.begin().await?;
    let procedure = ProcedureRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Procedure", id))?;
    let prices = PriceRepo::list_by_procedure(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(procedure_id = %id, "Procedure updated");
    Ok(Json(ProcedureWithPrices { procedure, prices }))
}

/// DELETE /api/v1/procedures/{id}
///
/// The prices go with the procedure (cascade); they are read first so the
/// response can report everything that was removed.
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeletedResponse<ProcedureWithPrices>>> {
    let mut tx = state.pool.begin().await?;
    let prices = PriceRepo::list_by_procedure(&mut *tx, id).await?;
    let procedure = ProcedureRepo::delete(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Procedure", id))?;
    tx.commit().await?;

    tracing::info!(procedure_id = %id, price_count = prices.len(), "Procedure deleted");
    Ok(Json(DeletedResponse::new(
        "Procedure deleted",
        ProcedureWithPrices { procedure, prices },
    )))
}

/// Query parameters for the total endpoint.
#[derive(Debug, Deserialize)]
pub struct TotalParams {
    /// Percent discount; defaults to 0.
    pub discount: Option<Decimal>,
}

/// GET /api/v1/procedures/{id}/total?discount=
///
/// Sum of all price tiers plus VAT, minus the discount.
pub async fn total(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppQuery(params): AppQuery<TotalParams>,
) -> AppResult<Json<ProcedureTotal>> {
    let discount = params.discount.unwrap_or(Decimal::ZERO);
    check_discount(discount)?;

    let procedure = ProcedureRepo::find_by_id_with_prices(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Procedure", id))?;

    Ok(Json(procedure_total(
        procedure.prices.iter().map(|p| p.amount),
        discount,
    )))
}
