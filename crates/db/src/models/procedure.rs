//! Procedure entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quotedesk_core::types::{DbId, Timestamp};

use crate::models::price::Price;

/// A procedure row from the `procedures` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Procedure {
    pub id: DbId,
    /// Display key, `PROCEDURE#<id>`.
    pub pk: String,
    /// Always `DETAILS`.
    pub sk: String,
    pub title: String,
    pub created_at: Timestamp,
}

/// A procedure with its price tiers embedded, in tier order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureWithPrices {
    #[serde(flatten)]
    pub procedure: Procedure,
    pub prices: Vec<Price>,
}
