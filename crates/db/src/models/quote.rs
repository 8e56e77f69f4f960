//! Quote entity model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use quotedesk_core::pricing::discounted_amount;
use quotedesk_core::types::{DbId, Timestamp};

/// A quote row from the `quotes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Quote {
    pub id: DbId,
    pub client_id: DbId,
    pub procedure_id: DbId,
    pub procedure_price_id: DbId,
    /// Percent, `0..=100`.
    pub discount: Decimal,
    /// Price amount at the time the quote was created.
    pub amount: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

/// A quote joined with its client name, procedure title and price type,
/// as shown in quote listings.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct QuoteDetail {
    pub id: DbId,
    pub client_id: DbId,
    pub client_name: String,
    pub procedure_id: DbId,
    pub procedure_title: String,
    pub procedure_price_id: DbId,
    pub price_type: String,
    pub discount: Decimal,
    pub amount: Decimal,
    /// `amount` after `discount`; computed, not stored.
    #[sqlx(skip)]
    #[serde(default)]
    pub total: Decimal,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

impl QuoteDetail {
    /// Fill in the derived `total` field.
    pub fn with_total(mut self) -> Self {
        self.total = discounted_amount(self.amount, self.discount);
        self
    }
}
