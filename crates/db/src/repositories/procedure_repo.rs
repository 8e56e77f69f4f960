//! Repository for the `procedures` table.

use std::collections::HashMap;

use sqlx::{PgConnection, PgExecutor, PgPool};
use quotedesk_core::schema::{procedure_pk, ProcedureInput, UpdateProcedure, PROCEDURE_SK};
use quotedesk_core::types::DbId;

use crate::models::price::Price;
use crate::models::procedure::{Procedure, ProcedureWithPrices};
use crate::repositories::PriceRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, pk, sk, title, created_at";

/// Provides CRUD operations for procedures and their embedded prices.
pub struct ProcedureRepo;

impl ProcedureRepo {
    /// Insert a procedure and all of its price tiers on the caller's connection.
    ///
    /// The procedure row is written first, then each price in input order.
    /// Call this inside a transaction so a failing price insert also undoes
    /// the procedure insert.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &ProcedureInput,
    ) -> Result<ProcedureWithPrices, sqlx::Error> {
        let query = format!(
            "INSERT INTO procedures (id, pk, sk, title)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let procedure = sqlx::query_as::<_, Procedure>(&query)
            .bind(id)
            .bind(procedure_pk(id))
            .bind(PROCEDURE_SK)
            .bind(&input.title)
            .fetch_one(&mut *conn)
            .await?;

        let prices = PriceRepo::create_many(conn, id, &input.prices).await?;

        Ok(ProcedureWithPrices { procedure, prices })
    }

    /// Find a procedure row by id, without its prices.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Procedure>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM procedures WHERE id = $1");
        sqlx::query_as::<_, Procedure>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a procedure by id, enriched with its prices.
    ///
    /// Both reads share one snapshot, so a procedure deleted mid-request is
    /// either returned whole or not at all.
    pub async fn find_by_id_with_prices(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ProcedureWithPrices>, sqlx::Error> {
        let mut tx = crate::begin_snapshot(pool).await?;
        let Some(procedure) = Self::find_by_id(&mut *tx, id).await? else {
            return Ok(None);
        };
        let prices = PriceRepo::list_by_procedure(&mut *tx, procedure.id).await?;
        tx.commit().await?;

        Ok(Some(ProcedureWithPrices { procedure, prices }))
    }

    /// List all procedures, newest first, each with its prices embedded.
    ///
    /// Uses two queries (procedures, then all of their prices) inside one
    /// snapshot and joins them in memory.
    pub async fn list_with_prices(pool: &PgPool) -> Result<Vec<ProcedureWithPrices>, sqlx::Error> {
        let mut tx = crate::begin_snapshot(pool).await?;
        let query = format!("SELECT {COLUMNS} FROM procedures ORDER BY created_at DESC, id ASC");
        let procedures = sqlx::query_as::<_, Procedure>(&query)
            .fetch_all(&mut *tx)
            .await?;

        if procedures.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<DbId> = procedures.iter().map(|p| p.id).collect();
        let mut by_procedure: HashMap<DbId, Vec<Price>> = HashMap::new();
        for price in PriceRepo::list_by_procedures(&mut *tx, &ids).await? {
            by_procedure.entry(price.procedure_id).or_default().push(price);
        }
        tx.commit().await?;

        Ok(procedures
            .into_iter()
            .map(|procedure| {
                let prices = by_procedure.remove(&procedure.id).unwrap_or_default();
                ProcedureWithPrices { procedure, prices }
            })
            .collect())
    }

    /// Update a procedure's title. `pk`, `sk` and `created_at` never change.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateProcedure,
    ) -> Result<Option<Procedure>, sqlx::Error> {
        let query = format!("UPDATE procedures SET title = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Procedure>(&query)
            .bind(id)
            .bind(&input.title)
            .fetch_optional(conn)
            .await
    }

    /// Delete a procedure, returning the removed row. Its prices are removed
    /// by the `ON DELETE CASCADE` foreign key.
    pub async fn delete(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Procedure>, sqlx::Error> {
        let query = format!("DELETE FROM procedures WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Procedure>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
