//! Quote and procedure pricing.
//!
//! Amounts are exact decimals; results are rounded to cents.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// VAT applied to procedure totals.
pub const VAT_RATE: Decimal = dec!(0.19);

/// Number of decimal places kept in monetary results.
const CENTS: u32 = 2;

/// Apply a percentage discount to an amount.
///
/// `discount` is expected in `[0, 100]`; callers validate it beforehand.
pub fn discounted_amount(amount: Decimal, discount: Decimal) -> Decimal {
    (amount * (Decimal::ONE_HUNDRED - discount) / Decimal::ONE_HUNDRED).round_dp(CENTS)
}

/// Breakdown of a procedure's total across all of its price tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureTotal {
    pub subtotal: Decimal,
    pub vat: Decimal,
    pub total_with_vat: Decimal,
    pub discount: Decimal,
    pub discount_amount: Decimal,
    pub total: Decimal,
}

/// Sum every price tier, add VAT, then apply `discount` percent.
pub fn procedure_total<I>(amounts: I, discount: Decimal) -> ProcedureTotal
where
    I: IntoIterator<Item = Decimal>,
{
    let subtotal: Decimal = amounts.into_iter().sum();
    let vat = subtotal * VAT_RATE;
    let total_with_vat = subtotal + vat;
    let discount_amount = total_with_vat * discount / Decimal::ONE_HUNDRED;

    ProcedureTotal {
        subtotal: subtotal.round_dp(CENTS),
        vat: vat.round_dp(CENTS),
        total_with_vat: total_with_vat.round_dp(CENTS),
        discount,
        discount_amount: discount_amount.round_dp(CENTS),
        total: (total_with_vat - discount_amount).round_dp(CENTS),
    }
}
