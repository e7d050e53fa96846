//! Display helpers for numbers and JSON payloads

use serde_json::Value;

/// Decimal places needed to show `num` digits after the leading
/// significant digit of `val`
///
/// `decimals(123.0, 2) == 0` since the integer part already carries them;
/// `decimals(0.05, 2) == 4`. Zero and non-finite values need no decimals.
pub fn decimals(val: f64, num: i32) -> u32 {
    if val == 0.0 || !val.is_finite() {
        return 0;
    }

    let digits = val.abs().log10().floor() as i32;
    num.saturating_sub(digits).max(0) as u32
}

/// Whether a JSON value has no enumerable members
///
/// Objects, arrays and strings are empty when they have no members;
/// `null`, booleans and numbers never have any.
pub fn is_empty_object(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        Value::Null | Value::Bool(_) | Value::Number(_) => true,
    }
}
