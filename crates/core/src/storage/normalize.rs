//! Numeric normalization at the read boundary.
//!
//! Stored numbers are exact decimals. Callers get plain JSON numbers: an
//! integer when the value has no fractional part, a float otherwise. The walk
//! recurses through lists and maps so nested values (task ids, embedded
//! manager ids) are normalized too.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};

use super::keys::{PK_ATTR, SK_ATTR};
use super::types::{AttrValue, Record};

/// Converts a stored value into plain JSON.
pub fn normalize(value: &AttrValue) -> Value {
    match value {
        AttrValue::Null => Value::Null,
        AttrValue::Bool(b) => Value::Bool(*b),
        AttrValue::N(n) => normalize_number(*n),
        AttrValue::BigN(raw) => normalize_big_number(raw),
        AttrValue::S(s) => Value::String(s.clone()),
        AttrValue::L(values) => Value::Array(values.iter().map(normalize).collect()),
        AttrValue::M(map) => Value::Object(
            map.iter()
                .map(|(name, value)| (name.clone(), normalize(value)))
                .collect(),
        ),
    }
}

/// Normalizes every attribute of a record and adds its `PK`/`SK` fields.
pub fn normalize_record(record: &Record) -> Map<String, Value> {
    let mut out: Map<String, Value> = record
        .attributes
        .iter()
        .map(|(name, value)| (name.clone(), normalize(value)))
        .collect();
    out.insert(PK_ATTR.to_string(), Value::String(record.pk.clone()));
    out.insert(SK_ATTR.to_string(), Value::String(record.sk.clone()));
    out
}

/// Integer when the fractional part is zero (`500000.00` counts), float
/// otherwise. Integers beyond the `u64` range degrade to a float.
pub fn normalize_number(n: Decimal) -> Value {
    if n.fract().is_zero() {
        let whole = n.trunc();
        if let Some(i) = whole.to_i64() {
            return Value::Number(Number::from(i));
        }
        if let Some(u) = whole.to_u64() {
            return Value::Number(Number::from(u));
        }
    }

    n.to_f64()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(n.to_string()))
}

/// Numbers too wide for an exact decimal come back as floats.
pub fn normalize_big_number(raw: &str) -> Value {
    raw.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or_else(|| Value::String(raw.to_string()))
}
