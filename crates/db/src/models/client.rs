//! Client entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quotedesk_core::types::DbId;

/// A client row from the `clients` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
}
