//! Repository for the `prices` table.

use sqlx::{PgConnection, PgExecutor};
use quotedesk_core::schema::PriceInput;
use quotedesk_core::types::{new_id, DbId};

use crate::models::price::Price;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, procedure_id, price_type, amount, position";

/// Provides CRUD operations for procedure price tiers.
pub struct PriceRepo;

impl PriceRepo {
    /// Insert one price tier for `procedure_id` at `position`.
    pub async fn create(
        conn: &mut PgConnection,
        procedure_id: DbId,
        position: i32,
        input: &PriceInput,
    ) -> Result<Price, sqlx::Error> {
        let query = format!(
            "INSERT INTO prices (id, procedure_id, price_type, amount, position)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Price>(&query)
            .bind(new_id())
            .bind(procedure_id)
            .bind(&input.price_type)
            .bind(input.amount)
            .bind(position)
            .fetch_one(conn)
            .await
    }

    /// Insert every tier in `inputs`, in order, on the caller's connection.
    ///
    /// Run this inside the transaction that created the procedure: the first
    /// failing insert aborts the whole batch.
    pub async fn create_many(
        conn: &mut PgConnection,
        procedure_id: DbId,
        inputs: &[PriceInput],
    ) -> Result<Vec<Price>, sqlx::Error> {
        let mut prices = Vec::with_capacity(inputs.len());
        for (position, input) in (0i32..).zip(inputs) {
            prices.push(Self::create(&mut *conn, procedure_id, position, input).await?);
        }
        Ok(prices)
    }

    /// Find a price by id.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prices WHERE id = $1");
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a price only if it belongs to `procedure_id`.
    pub async fn find_for_procedure<'e>(
        executor: impl PgExecutor<'e>,
        procedure_id: DbId,
        id: DbId,
    ) -> Result<Option<Price>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM prices WHERE id = $1 AND procedure_id = $2");
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .bind(procedure_id)
            .fetch_optional(executor)
            .await
    }

    /// List the tiers of one procedure in tier order.
    pub async fn list_by_procedure<'e>(
        executor: impl PgExecutor<'e>,
        procedure_id: DbId,
    ) -> Result<Vec<Price>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prices WHERE procedure_id = $1 ORDER BY position, price_type"
        );
        sqlx::query_as::<_, Price>(&query)
            .bind(procedure_id)
            .fetch_all(executor)
            .await
    }

    /// List the tiers of several procedures at once, grouped by procedure
    /// and in tier order within each group.
    pub async fn list_by_procedures<'e>(
        executor: impl PgExecutor<'e>,
        procedure_ids: &[DbId],
    ) -> Result<Vec<Price>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM prices WHERE procedure_id = ANY($1)
             ORDER BY procedure_id, position, price_type"
        );
        sqlx::query_as::<_, Price>(&query)
            .bind(procedure_ids)
            .fetch_all(executor)
            .await
    }

    /// Replace a tier's type and amount.
    ///
    /// Existing quotes keep their own amount snapshot and are not touched.
    /// Returns `None` if the price does not exist under `procedure_id`.
    pub async fn update(
        conn: &mut PgConnection,
        procedure_id: DbId,
        id: DbId,
        input: &PriceInput,
    ) -> Result<Option<Price>, sqlx::Error> {
        let query = format!(
            "UPDATE prices SET price_type = $3, amount = $4
             WHERE id = $1 AND procedure_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Price>(&query)
            .bind(id)
            .bind(procedure_id)
            .bind(&input.price_type)
            .bind(input.amount)
            .fetch_optional(conn)
            .await
    }
}
