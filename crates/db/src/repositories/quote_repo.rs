//! Repository for the `quotes` table.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgExecutor, PgPool};
use quotedesk_core::schema::QuoteInput;
use quotedesk_core::types::DbId;

use crate::models::quote::{Quote, QuoteDetail};

/// Column list for plain `quotes` rows.
const COLUMNS: &str =
    "id, client_id, procedure_id, procedure_price_id, discount, amount, notes, created_at";

/// Joined select used by the listing and detail queries.
const DETAIL_SELECT: &str = "SELECT q.id, q.client_id, c.name AS client_name, \
        q.procedure_id, p.title AS procedure_title, \
        q.procedure_price_id, pr.price_type, \
        q.discount, q.amount, q.notes, q.created_at \
     FROM quotes q \
     INNER JOIN clients c ON c.id = q.client_id \
     INNER JOIN procedures p ON p.id = q.procedure_id \
     INNER JOIN prices pr ON pr.id = q.procedure_price_id";

/// Provides create, read and delete operations for quotes.
pub struct QuoteRepo;

impl QuoteRepo {
    /// Insert a quote. `amount` is the snapshot of the chosen price.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &QuoteInput,
        amount: Decimal,
    ) -> Result<Quote, sqlx::Error> {
        let query = format!(
            "INSERT INTO quotes
                (id, client_id, procedure_id, procedure_price_id, discount, amount, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .bind(input.client_id)
            .bind(input.procedure_id)
            .bind(input.procedure_price_id)
            .bind(input.discount)
            .bind(amount)
            .bind(input.normalized_notes())
            .fetch_one(conn)
            .await
    }

    /// List all quotes, newest first, joined with client and procedure names.
    pub async fn list_with_names(pool: &PgPool) -> Result<Vec<QuoteDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} ORDER BY q.created_at DESC, q.id ASC");
        let rows = sqlx::query_as::<_, QuoteDetail>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(QuoteDetail::with_total).collect())
    }

    /// Find one quote with its joined names.
    pub async fn find_by_id_with_names<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<QuoteDetail>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE q.id = $1");
        let row = sqlx::query_as::<_, QuoteDetail>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(QuoteDetail::with_total))
    }

    /// Delete a quote, returning the removed row (`None` if it did not exist).
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<Option<Quote>, sqlx::Error> {
        let query = format!("DELETE FROM quotes WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Quote>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
