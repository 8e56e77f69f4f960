//! Handlers for the `/clients` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use quotedesk_core::error::CoreError;
use quotedesk_core::schema::ClientInput;
use quotedesk_core::types::{new_id, DbId};
use quotedesk_db::models::client::Client;
use quotedesk_db::repositories::ClientRepo;
use sqlx::PgConnection;

use crate::error::{AppError, AppResult};
use crate::extract::{AppPath, ValidatedJson};
use crate::response::DeletedResponse;
use crate::state::AppState;

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ClientInput>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let mut tx = state.pool.begin().await?;
    ensure_email_free(&mut tx, &input.email, None).await?;
    let client = ClientRepo::create(&mut *tx, new_id(), &input).await?;
    tx.commit().await?;

    tracing::info!(client_id = %client.id, "Client created");
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(&state.pool).await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<Client>> {
    let client = ClientRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    Ok(Json(client))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    ValidatedJson(input): ValidatedJson<ClientInput>,
) -> AppResult<Json<Client>> {
    let mut tx = state.pool.begin().await?;
    ensure_email_free(&mut tx, &input.email, Some(id)).await?;
    let client = ClientRepo::update(&mut *tx, id, &input)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    tx.commit().await?;

    tracing::info!(client_id = %id, "Client updated");
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DeletedResponse<Client>>> {
    let mut tx = state.pool.begin().await?;
    let client = ClientRepo::delete(&mut *tx, id)
        .await?
        .ok_or(AppError::not_found("Client", id))?;
    tx.commit().await?;

    tracing::info!(client_id = %id, "Client deleted");
    Ok(Json(DeletedResponse::new("Client deleted", client)))
}

/// Reject an email already held by another client.
///
/// The `uq_clients_email` constraint still backs this up when two requests
/// race; that path surfaces as a 409 from the database error mapping.
async fn ensure_email_free(
    conn: &mut PgConnection,
    email: &str,
    current: Option<DbId>,
) -> AppResult<()> {
    match ClientRepo::find_by_email(conn, email).await? {
        Some(existing) if Some(existing.id) != current => Err(CoreError::Conflict(format!(
            "A client with email {email} already exists"
        ))
        .into()),
        _ => Ok(()),
    }
}
