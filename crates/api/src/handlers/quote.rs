//! Handlers for the `/quotes` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quotedesk_core::schema::QuoteInput;
use quotedesk_core::types::{new_id, DbId};
use quotedesk_db::models::quote::{Quote, QuoteDetail};
use quotedesk_db::repositories::{ClientRepo, PriceRepo, ProcedureRepo, QuoteRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidatedJson};
use crate::response::DeletedResponse;
use crate::state::AppState;

/// POST /api/v1/quotes
///
/// Inside one transaction: confirm the client and procedure exist, confirm
/// the chosen price belongs to that procedure, then store the quote with a
/// snapshot of the price's current amount.
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<QuoteInput>,
) -> AppResult<(StatusCode, Json<QuoteDetail>)> {
    let mut tx = state.pool.begin().await?;

    ClientRepo::find_by_id(&mut *tx, input.client_id)
        .await?
        .ok_or(AppError::not_found("Client", input.client_id))?;
    ProcedureRepo::find_by_id(&mut *tx, input.procedure_id)
        .await?
        .ok_or(AppError::not_found("Procedure", input.procedure_id))?;
    let price = PriceRepo::find_for_procedure(&mut *tx, input.procedure_id, input.procedure_price_id)
        .await?
        .ok_or(AppError::not_found("Price", input.procedure_price_id))?;

    let quote = QuoteRepo::create(&mut *tx, new_id(), &input, price.amount).await?;
    let detail = QuoteRepo::find_by_id_with_names(&mut *tx, quote.id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("Quote {} vanished after insert", quote.id)))?;
    tx.commit().await?;

    tracing::info!(
        quote_id = %quote.id,
        client_id = %quote.client_id,
        procedure_id = %quote.procedure_id,
        "Quote created",
    );
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/v1/quotes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<QuoteDetail>>> {
    let quotes = QuoteRepo::list_with_names(&state.pool).await?;
    Ok(Json(quotes))
}

/// GET /api/v1/quotes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<QuoteDetail>> {
    let quote = QuoteRepo::find_by_id_with_names(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Quote", id))?;
    Ok(Json(quote))
}

/// DELETE /api/v1/quotes/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeletedResponse<Quote>>> {
    let mut tx = state.pool.begin().await?;
    let quote = QuoteRepo::delete(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Quote", id))?;
    tx.commit().await?;

    tracing::info!(quote_id = %id, "Quote deleted");
    Ok(Json(DeletedResponse::new("Quote deleted", quote)))
}
