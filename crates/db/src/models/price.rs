//! Price tier model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quotedesk_core::types::DbId;

/// A price row from the `prices` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Price {
    pub id: DbId,
    pub procedure_id: DbId,
    #[serde(rename = "type")]
    pub price_type: String,
    pub amount: Decimal,
    /// Zero-based order of the tier within its procedure.
    pub position: i32,
}
