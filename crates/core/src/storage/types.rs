use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::keys::RecordKey;

/// Non-key attributes of a record, by name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// A stored attribute value.
///
/// Mirrors the value shapes a wide-column store accepts. Numbers are exact
/// decimals; conversion to plain JSON numbers happens only at the read
/// boundary (see [`super::normalize`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Null,
    Bool(bool),
    N(Decimal),
    /// Number outside the exact decimal range, kept in its stored text form.
    BigN(String),
    S(String),
    L(Vec<AttrValue>),
    M(Attributes),
}

impl AttrValue {
    /// Builds a list of string values.
    pub fn string_list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AttrValue::L(values.into_iter().map(|s| AttrValue::S(s.into())).collect())
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttrValue::S(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_l(&self) -> Option<&[AttrValue]> {
        match self {
            AttrValue::L(values) => Some(values),
            _ => None,
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::S(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::S(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::N(Decimal::from(value))
    }
}

impl From<Decimal> for AttrValue {
    fn from(value: Decimal) -> Self {
        AttrValue::N(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

/// One keyed item: the unit of every put, get and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub pk: String,
    pub sk: String,
    pub attributes: Attributes,
}

impl Record {
    pub fn new(key: RecordKey) -> Self {
        Self {
            pk: key.pk,
            sk: key.sk,
            attributes: Attributes::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    pub fn with(mut self, name: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.pk.clone(), self.sk.clone())
    }

    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    /// Reads a list attribute holding reference sort keys.
    ///
    /// Non-string entries are ignored; a missing attribute yields no references.
    pub fn references(&self, name: &str) -> Vec<String> {
        self.get(name)
            .and_then(AttrValue::as_l)
            .map(|values| {
                values
                    .iter()
                    .filter_map(AttrValue::as_s)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_builder() {
        let record = Record::new(RecordKey::new("ORG#CodexOrg", "METADATA"))
            .with("name", "CodexOrg")
            .with("founded", 1998_i64);

        assert_eq!(record.key(), RecordKey::new("ORG#CodexOrg", "METADATA"));
        assert_eq!(record.get("name"), Some(&AttrValue::S("CodexOrg".to_string())));
        assert_eq!(record.get("founded"), Some(&AttrValue::N(Decimal::from(1998))));
    }

    #[test]
    fn test_with_overwrites() {
        let record = Record::new(RecordKey::new("p", "s"))
            .with("role", "Intern")
            .with("role", "Engineer");

        assert_eq!(record.get("role").and_then(AttrValue::as_s), Some("Engineer"));
    }

    #[test]
    fn test_references() {
        let record = Record::new(RecordKey::new("ORG#CodexOrg", "PROJ#AI Development")).with(
            "employees",
            AttrValue::L(vec![
                AttrValue::from("EMP#John"),
                AttrValue::from(7_i64),
                AttrValue::from("EMP#Jane"),
            ]),
        );

        assert_eq!(record.references("employees"), vec!["EMP#John", "EMP#Jane"]);
        assert!(record.references("missing").is_empty());
    }
}
