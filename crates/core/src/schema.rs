//! Input schemas for clients, procedures, prices and quotes.
//!
//! Each input DTO derives [`Validate`]; [`check`] runs the rules and
//! flattens every failure into a [`FieldViolation`] list so a caller can
//! highlight all invalid fields from a single round trip. The same DTOs
//! serve create and update paths.

use std::borrow::Cow;
use std::cmp::Ordering;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;
use crate::types::DbId;

/* --------------------------------------------------------------------------
   Procedure key constants
   -------------------------------------------------------------------------- */

/// Fixed discriminator stored in every procedure's `sk` column.
pub const PROCEDURE_SK: &str = "DETAILS";

/// Prefix of the synthesized procedure display key.
pub const PROCEDURE_PK_PREFIX: &str = "PROCEDURE#";

/// Upper bound of a quote discount, in percent.
pub const MAX_DISCOUNT: Decimal = Decimal::ONE_HUNDRED;

/// Largest amount a `NUMERIC(12, 2)` money column holds.
pub const MAX_AMOUNT: Decimal = dec!(9999999999.99);

/// Decimal places stored for amounts and discounts.
pub const MONEY_SCALE: u32 = 2;

/// Build the display key (`pk`) for a procedure id.
pub fn procedure_pk(id: DbId) -> String {
    format!("{PROCEDURE_PK_PREFIX}{id}")
}

/* --------------------------------------------------------------------------
   Input DTOs
   -------------------------------------------------------------------------- */

/// Client fields accepted on `POST /clients` and `PUT /clients/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email"))]
    pub email: String,
}

/// One price tier of a procedure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PriceInput {
    #[serde(rename = "type")]
    #[validate(length(min = 3, message = "Price type must be at least 3 characters"))]
    pub price_type: String,
    #[validate(custom(function = "validate_amount"))]
    pub amount: Decimal,
}

/// Procedure fields accepted on `POST /procedures`.
///
/// `pk`, `sk` and `created_at` are server-generated and never read from input.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProcedureInput {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
    #[serde(default)]
    #[validate(nested)]
    pub prices: Vec<PriceInput>,
}

/// Procedure fields accepted on `PUT /procedures/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProcedure {
    #[validate(length(min = 3, message = "Title must be at least 3 characters"))]
    pub title: String,
}

/// Quote fields accepted on `POST /quotes`.
///
/// The quoted amount is not part of the input: it is copied from the chosen
/// price when the quote is written.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteInput {
    pub client_id: DbId,
    pub procedure_id: DbId,
    pub procedure_price_id: DbId,
    #[validate(custom(function = "validate_discount"))]
    pub discount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteInput {
    /// Notes with surrounding whitespace removed; blank notes become `None`.
    pub fn normalized_notes(&self) -> Option<String> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}

/* --------------------------------------------------------------------------
   Custom rules
   -------------------------------------------------------------------------- */

fn violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// More than [`MONEY_SCALE`] significant decimals cannot be stored exactly.
fn has_excess_scale(value: &Decimal) -> bool {
    value.normalize().scale() > MONEY_SCALE
}

fn validate_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(violation("range", "Price cannot be negative"));
    }
    if *value > MAX_AMOUNT {
        return Err(violation("range", "Price cannot exceed 9999999999.99"));
    }
    if has_excess_scale(value) {
        return Err(violation("scale", "Price can have at most 2 decimals"));
    }
    Ok(())
}

fn validate_discount(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > MAX_DISCOUNT {
        return Err(violation("range", "Discount must be between 0 and 100"));
    }
    if has_excess_scale(value) {
        return Err(violation("scale", "Discount can have at most 2 decimals"));
    }
    Ok(())
}

/// Validate a discount passed outside a DTO (e.g. a query parameter).
pub fn check_discount(value: Decimal) -> Result<(), CoreError> {
    validate_discount(&value).map_err(|e| {
        CoreError::InvalidFields(vec![FieldViolation::from_error("discount".into(), &e)])
    })
}

/* --------------------------------------------------------------------------
   Violation reporting
   -------------------------------------------------------------------------- */

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dotted path to the field, e.g. `prices.1.amount`.
    pub path: String,
    pub message: String,
    pub code: String,
}

impl FieldViolation {
    fn from_error(path: String, err: &ValidationError) -> Self {
        Self {
            path,
            message: err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Invalid value ({})", err.code)),
            code: err.code.to_string(),
        }
    }
}

/// Validate `input`, returning every violation as [`CoreError::InvalidFields`].
pub fn check<T: Validate>(input: &T) -> Result<(), CoreError> {
    input
        .validate()
        .map_err(|errors| CoreError::InvalidFields(violations(&errors)))
}

/// Flatten nested `validator` errors into a list sorted by path.
///
/// Paths use the JSON key of each field, and list indices sort numerically
/// (`prices.2` before `prices.10`).
pub fn violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort_by(|a, b| compare_paths(&a.path, &b.path));
    out
}

/// JSON key for a Rust field name where `#[serde(rename)]` differs.
fn wire_name(field: &str) -> &str {
    match field {
        "price_type" => "type",
        other => other,
    }
}

fn compare_paths(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let ord = match (x.parse::<usize>(), y.parse::<usize>()) {
                    (Ok(i), Ok(j)) => i.cmp(&j),
                    _ => x.cmp(y),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldViolation>) {
    for (field, kind) in errors.errors() {
        let field = wire_name(field);
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{prefix}.{field}")
        };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                out.extend(errs.iter().map(|e| FieldViolation::from_error(path.clone(), e)));
            }
            ValidationErrorsKind::Struct(inner) => collect(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    collect(inner, &format!("{path}.{index}"), out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    use super::*;

    fn price(price_type: &str, amount: Decimal) -> PriceInput {
        PriceInput {
            price_type: price_type.to_string(),
            amount,
        }
    }

    fn violations_of<T: Validate>(input: &T) -> Vec<FieldViolation> {
        match check(input) {
            Err(CoreError::InvalidFields(v)) => v,
            other => panic!("expected InvalidFields, got {other:?}"),
        }
    }

    #[test]
    fn client_accepts_minimal_valid_input() {
        let input = ClientInput {
            name: "Jo".into(),
            email: "a@b.com".into(),
        };
        assert!(check(&input).is_ok());
    }

    #[test]
    fn client_rejects_malformed_email() {
        let input = ClientInput {
            name: "Jane Doe".into(),
            email: "not-an-email".into(),
        };
        let v = violations_of(&input);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "email");
        assert_eq!(v[0].code, "email");
        assert_eq!(v[0].message, "Invalid email");
    }

    #[test]
    fn client_reports_all_violations_at_once() {
        let input = ClientInput {
            name: "J".into(),
            email: "nope".into(),
        };
        let paths: Vec<_> = violations_of(&input).into_iter().map(|v| v.path).collect();
        assert_eq!(paths, vec!["email", "name"]);
    }

    #[test]
    fn price_amount_boundary() {
        assert!(check(&price("Standard", dec!(0))).is_ok());
        let v = violations_of(&price("Standard", dec!(-0.01)));
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "amount");
        assert_eq!(v[0].code, "range");
    }

    #[test]
    fn price_type_needs_three_characters() {
        let v = violations_of(&price("ab", dec!(10)));
        assert_eq!(v[0].code, "length");
        assert_eq!(v[0].path, "type");
    }

    #[test]
    fn nested_price_type_reports_json_key() {
        let input = ProcedureInput {
            title: "Cleaning".into(),
            prices: vec![price("Standard", dec!(100)), price("Pr", dec!(-5))],
        };
        let paths: Vec<_> = violations_of(&input).into_iter().map(|v| v.path).collect();
        assert_eq!(paths, vec!["prices.1.amount", "prices.1.type"]);
    }

    #[test]
    fn price_amount_upper_bound() {
        assert!(check(&price("Standard", MAX_AMOUNT)).is_ok());
        let v = violations_of(&price("Standard", dec!(10000000000)));
        assert_eq!(v[0].path, "amount");
        assert_eq!(v[0].code, "range");
    }

    #[test]
    fn price_amount_scale() {
        assert!(check(&price("Standard", dec!(59.90))).is_ok());
        assert!(check(&price("Standard", dec!(12.500))).is_ok());
        let v = violations_of(&price("Standard", dec!(0.004)));
        assert_eq!(v[0].path, "amount");
        assert_eq!(v[0].code, "scale");
    }

    #[test]
    fn list_indices_sort_numerically() {
        let mut prices: Vec<_> = (0..11).map(|_| price("Standard", dec!(1))).collect();
        prices[10].amount = dec!(-1);
        prices[2].amount = dec!(-1);
        let input = ProcedureInput {
            title: "Cleaning".into(),
            prices,
        };
        let paths: Vec<_> = violations_of(&input).into_iter().map(|v| v.path).collect();
        assert_eq!(paths, vec!["prices.2.amount", "prices.10.amount"]);
    }

    #[test]
    fn procedure_reports_nested_price_paths() {
        let input = ProcedureInput {
            title: "Cleaning".into(),
            prices: vec![price("Standard", dec!(100)), price("Premium", dec!(-5))],
        };
        let v = violations_of(&input);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].path, "prices.1.amount");
    }

    #[test]
    fn procedure_without_prices_is_valid() {
        let input = ProcedureInput {
            title: "Whitening".into(),
            prices: vec![],
        };
        assert!(check(&input).is_ok());
    }

    #[test]
    fn procedure_title_too_short() {
        let input = UpdateProcedure { title: "ab".into() };
        let v = violations_of(&input);
        assert_eq!(v[0].path, "title");
    }

    #[test]
    fn quote_discount_bounds() {
        let mut input = QuoteInput {
            client_id: DbId::nil(),
            procedure_id: DbId::nil(),
            procedure_price_id: DbId::nil(),
            discount: dec!(100),
            notes: None,
        };
        assert!(check(&input).is_ok());

        input.discount = dec!(0);
        assert!(check(&input).is_ok());

        input.discount = dec!(100.01);
        assert_matches!(check(&input), Err(CoreError::InvalidFields(_)));

        input.discount = dec!(-1);
        assert_matches!(check(&input), Err(CoreError::InvalidFields(_)));

        input.discount = dec!(33.333);
        assert_matches!(check(&input), Err(CoreError::InvalidFields(v)) if v[0].code == "scale");
    }

    #[test]
    fn check_discount_names_the_field() {
        let err = check_discount(dec!(150)).unwrap_err();
        assert_matches!(err, CoreError::InvalidFields(v) if v[0].path == "discount");
    }

    #[test]
    fn blank_notes_normalize_to_none() {
        let mut input = QuoteInput {
            client_id: DbId::nil(),
            procedure_id: DbId::nil(),
            procedure_price_id: DbId::nil(),
            discount: dec!(0),
            notes: Some("   ".into()),
        };
        assert_eq!(input.normalized_notes(), None);
        input.notes = Some(" call back ".into());
        assert_eq!(input.normalized_notes().as_deref(), Some("call back"));
    }

    #[test]
    fn price_input_reads_type_key() {
        let input: PriceInput =
            serde_json::from_value(serde_json::json!({"type": "Standard", "amount": 100})).unwrap();
        assert_eq!(input.price_type, "Standard");
        assert_eq!(input.amount, dec!(100));
    }

    #[test]
    fn procedure_pk_is_prefixed() {
        let id = DbId::nil();
        assert_eq!(
            procedure_pk(id),
            "PROCEDURE#00000000-0000-0000-0000-000000000000"
        );
    }
}
