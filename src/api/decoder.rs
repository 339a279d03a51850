//! Decoding of positional portfolio rows
//!
//! The update endpoint encodes each position as an array of values whose
//! meaning is fixed by array position, not by name. That index contract is
//! dictated and versioned by the server; the table below is the single
//! place it lives in this crate.

use rust_decimal::Decimal;
use serde_json::Value;

use super::types::ApiError;
use crate::portfolio::types::Position;

/// Row tag for tradable positions; rows with any other tag (cash funds,
/// currency balances) are skipped, not errors.
const PRODUCT_ROW_TAG: &str = "PRODUCT";

/// Field positions inside a portfolio row's value array.
///
/// A server-side format change is a one-table edit here.
mod field_index {
    pub const ID: usize = 0;
    pub const SIZE: usize = 2;
    pub const PRICE: usize = 3;
    pub const BREAK_EVEN_PRICE: usize = 9;
}

/// Decode the `portfolio.value` rows of an update payload into positions.
///
/// Order and duplicates are preserved from the input. One malformed row
/// fails the whole decode: a row that no longer matches the index table
/// means the server format moved.
pub fn decode_positions(payload: &Value) -> Result<Vec<Position>, ApiError> {
    let rows = payload
        .pointer("/portfolio/value")
        .and_then(Value::as_array)
        .ok_or(ApiError::MalformedResponse("portfolio.value"))?;

    let mut positions = Vec::new();
    for row in rows {
        if row.get("positionType").and_then(Value::as_str) != Some(PRODUCT_ROW_TAG) {
            continue;
        }
        positions.push(decode_row(row)?);
    }
    Ok(positions)
}

fn decode_row(row: &Value) -> Result<Position, ApiError> {
    let values = row
        .get("value")
        .and_then(Value::as_array)
        .ok_or_else(|| missing("value", "<unknown>"))?;

    let id = string_at(values, field_index::ID)
        .ok_or_else(|| missing("id", "<unknown>"))?;

    Ok(Position {
        size: decimal_at(values, field_index::SIZE, "size", &id)?,
        price: decimal_at(values, field_index::PRICE, "price", &id)?,
        break_even_price: decimal_at(
            values,
            field_index::BREAK_EVEN_PRICE,
            "breakEvenPrice",
            &id,
        )?,
        id,
    })
}

/// The server emits product ids both as strings and as bare numbers
fn string_at(values: &[Value], idx: usize) -> Option<String> {
    match values.get(idx)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn decimal_at(
    values: &[Value],
    idx: usize,
    field: &'static str,
    id: &str,
) -> Result<Decimal, ApiError> {
    let value = values.get(idx).ok_or_else(|| missing(field, id))?;
    serde_json::from_value::<Decimal>(value.clone()).map_err(|_| missing(field, id))
}

fn missing(field: &'static str, id: &str) -> ApiError {
    ApiError::MissingField {
        product_id: id.to_string(),
        field,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn product_row(id: &str, size: f64, price: f64, break_even: f64) -> Value {
        json!({
            "positionType": "PRODUCT",
            "value": [id, null, size, price, 0, 0, 0, 0, 0, break_even]
        })
    }

    fn payload(rows: Vec<Value>) -> Value {
        json!({ "portfolio": { "value": rows } })
    }

    #[test]
    fn decodes_product_rows_only_preserving_order() {
        let payload = payload(vec![
            product_row("331868", 10.0, 105.0, 100.0),
            json!({
                "positionType": "CASH",
                "value": ["EUR", null, 2500.0, 1.0, 0, 0, 0, 0, 0, 1.0]
            }),
            product_row("17461000", -5.0, 20.0, 25.0),
        ]);

        let positions = decode_positions(&payload).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].id, "331868");
        assert_eq!(positions[0].size, dec!(10));
        assert_eq!(positions[0].price, dec!(105));
        assert_eq!(positions[0].break_even_price, dec!(100));
        assert_eq!(positions[1].id, "17461000");
        assert_eq!(positions[1].size, dec!(-5));
    }

    #[test]
    fn numeric_ids_are_coerced_to_strings() {
        let payload = payload(vec![json!({
            "positionType": "PRODUCT",
            "value": [331868, null, 1.0, 2.0, 0, 0, 0, 0, 0, 3.0]
        })]);

        let positions = decode_positions(&payload).unwrap();
        assert_eq!(positions[0].id, "331868");
    }

    #[test]
    fn short_row_fails_naming_field_and_record() {
        // Row ends before the break-even index.
        let payload = payload(vec![json!({
            "positionType": "PRODUCT",
            "value": ["331868", null, 10.0, 105.0]
        })]);

        let err = decode_positions(&payload).unwrap_err();
        match err {
            ApiError::MissingField { product_id, field } => {
                assert_eq!(product_id, "331868");
                assert_eq!(field, "breakEvenPrice");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn wrong_shape_value_fails_the_whole_decode() {
        let payload = payload(vec![
            product_row("ok", 1.0, 2.0, 3.0),
            json!({
                "positionType": "PRODUCT",
                "value": ["bad", null, "not-a-number", 105.0, 0, 0, 0, 0, 0, 100.0]
            }),
        ]);

        let err = decode_positions(&payload).unwrap_err();
        match err {
            ApiError::MissingField { product_id, field } => {
                assert_eq!(product_id, "bad");
                assert_eq!(field, "size");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicates_are_preserved() {
        let payload = payload(vec![
            product_row("331868", 10.0, 105.0, 100.0),
            product_row("331868", 10.0, 105.0, 100.0),
        ]);

        let positions = decode_positions(&payload).unwrap();
        assert_eq!(positions.len(), 2);
    }

    #[test]
    fn payload_without_portfolio_section_is_malformed() {
        let err = decode_positions(&json!({})).unwrap_err();
        assert!(matches!(err, ApiError::MalformedResponse("portfolio.value")));
    }
}
