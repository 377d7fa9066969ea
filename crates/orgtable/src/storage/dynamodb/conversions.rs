//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! [`Record`]s. These are testable in isolation without DynamoDB access.

use std::collections::HashMap;
use std::str::FromStr;

use aws_sdk_dynamodb::types::AttributeValue;
use orgtable_core::storage::keys::{PK_ATTR, SK_ATTR};
use orgtable_core::storage::{AttrValue, Attributes, Record, StoreError};
use rust_decimal::Decimal;

/// Convert a Record to a DynamoDB item, keys included.
pub fn record_to_item(record: &Record) -> HashMap<String, AttributeValue> {
    let mut item: HashMap<String, AttributeValue> = record
        .attributes
        .iter()
        .map(|(name, value)| (name.clone(), to_attribute_value(value)))
        .collect();

    // Keys
    item.insert(PK_ATTR.to_string(), AttributeValue::S(record.pk.clone()));
    item.insert(SK_ATTR.to_string(), AttributeValue::S(record.sk.clone()));

    item
}

/// Convert a DynamoDB item to a Record.
pub fn item_to_record(item: &HashMap<String, AttributeValue>) -> Result<Record, StoreError> {
    let pk = get_key(item, PK_ATTR)?;
    let sk = get_key(item, SK_ATTR)?;

    let attributes = item
        .iter()
        .filter(|(name, _)| name.as_str() != PK_ATTR && name.as_str() != SK_ATTR)
        .map(|(name, value)| Ok((name.clone(), from_attribute_value(name, value)?)))
        .collect::<Result<Attributes, StoreError>>()?;

    Ok(Record { pk, sk, attributes })
}

/// Convert an AttrValue to its DynamoDB representation.
pub fn to_attribute_value(value: &AttrValue) -> AttributeValue {
    match value {
        AttrValue::Null => AttributeValue::Null(true),
        AttrValue::Bool(b) => AttributeValue::Bool(*b),
        AttrValue::N(n) => AttributeValue::N(n.to_string()),
        AttrValue::BigN(raw) => AttributeValue::N(raw.clone()),
        AttrValue::S(s) => AttributeValue::S(s.clone()),
        AttrValue::L(values) => AttributeValue::L(values.iter().map(to_attribute_value).collect()),
        AttrValue::M(map) => AttributeValue::M(
            map.iter()
                .map(|(name, value)| (name.clone(), to_attribute_value(value)))
                .collect(),
        ),
    }
}

/// Convert a DynamoDB AttributeValue to an AttrValue.
///
/// String and number sets become lists. Binary values have no counterpart and
/// are rejected.
pub fn from_attribute_value(name: &str, value: &AttributeValue) -> Result<AttrValue, StoreError> {
    match value {
        AttributeValue::Null(_) => Ok(AttrValue::Null),
        AttributeValue::Bool(b) => Ok(AttrValue::Bool(*b)),
        AttributeValue::N(n) => parse_number(name, n),
        AttributeValue::S(s) => Ok(AttrValue::S(s.clone())),
        AttributeValue::L(values) => values
            .iter()
            .map(|v| from_attribute_value(name, v))
            .collect::<Result<Vec<_>, _>>()
            .map(AttrValue::L),
        AttributeValue::M(map) => map
            .iter()
            .map(|(key, v)| Ok((key.clone(), from_attribute_value(key, v)?)))
            .collect::<Result<Attributes, StoreError>>()
            .map(AttrValue::M),
        AttributeValue::Ss(values) => Ok(AttrValue::string_list(values.iter().cloned())),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|n| parse_number(name, n))
            .collect::<Result<Vec<_>, _>>()
            .map(AttrValue::L),
        _ => Err(StoreError::InvalidData(format!(
            "Unsupported attribute type for field: {}",
            name
        ))),
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string key attribute.
fn get_key(item: &HashMap<String, AttributeValue>, key: &str) -> Result<String, StoreError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| StoreError::InvalidData(format!("Missing or invalid key: {}", key)))
}

/// Parse a DynamoDB number string, including exponent notation.
///
/// DynamoDB allows up to 38 significant digits. Values that do not fit an
/// exact decimal are kept as their stored text.
fn parse_number(name: &str, raw: &str) -> Result<AttrValue, StoreError> {
    if let Ok(n) = Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw)) {
        return Ok(AttrValue::N(n));
    }

    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(AttrValue::BigN(raw.to_string())),
        _ => Err(StoreError::InvalidData(format!(
            "Invalid number {}: {}",
            name, raw
        ))),
    }
}
