//! Repository for the `clients` table.

use sqlx::{PgConnection, PgExecutor, PgPool};
use quotedesk_core::schema::ClientInput;
use quotedesk_core::types::DbId;

use crate::models::client::Client;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email";

/// Provides CRUD operations for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client with a caller-generated id, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        id: DbId,
        input: &ClientInput,
    ) -> Result<Client, sqlx::Error> {
        let query =
            format!("INSERT INTO clients (id, name, email) VALUES ($1, $2, $3) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(conn)
            .await
    }

    /// Find a client by id.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a client by its (unique) email.
    pub async fn find_by_email<'e>(
        executor: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE email = $1");
        sqlx::query_as::<_, Client>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// List all clients ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Client>(&query).fetch_all(pool).await
    }

    /// Replace a client's name and email.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        input: &ClientInput,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query =
            format!("UPDATE clients SET name = $2, email = $3 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_optional(conn)
            .await
    }

    /// Delete a client, returning the removed row (`None` if it did not exist).
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("DELETE FROM clients WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }
}
