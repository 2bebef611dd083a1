//! Deep structural equality over JSON values.

use serde_json::{Number, Value};

/// Compare the documented value with the observed one.
///
/// Objects must have the same key set with equal values, in any order.
/// Arrays must have the same length and equal elements in order. Scalars
/// must agree in both type and value, so `1`, `"1"` and `true` are all
/// distinct. Numbers compare by value: `10` and `10.0` are the same number.
#[must_use]
pub fn structurally_equal(expected: &Value, observed: &Value) -> bool {
    match (expected, observed) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| structurally_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.get(key)
                        .is_some_and(|other| structurally_equal(value, other))
                })
        }
        _ => false,
    }
}

// Two integers compare exactly; a float on either side compares as f64.
#[allow(clippy::float_cmp, reason = "JSON numbers are equal only when identical")]
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if a.is_f64() || b.is_f64() {
        a.as_f64()
            .zip(b.as_f64())
            .is_some_and(|(x, y)| x == y)
    } else {
        a == b
    }
}
