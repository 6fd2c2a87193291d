//! Column values and result rows as they travel from the store to clients.
//!
//! Serialization here is the response encoding: every variant maps onto its
//! natural JSON form, except [`Value::Timestamp`], which is rendered with
//! [`TIMESTAMP_FORMAT`](crate::time::TIMESTAMP_FORMAT) instead of any
//! serializer default.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::time::{Timestamp, format_timestamp};

/// A single column value, either bound as a statement parameter or read back
/// from a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Timestamp(Timestamp),
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Real(value) => serializer.serialize_f64(*value),
            Self::Text(value) => serializer.serialize_str(value),
            Self::Timestamp(value) => serializer.serialize_str(&format_timestamp(value)),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Timestamp> for Value {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One result row: column names paired with values, in select-list order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a column. Order of insertion is the order of serialization.
    pub fn push(&mut self, column: impl Into<String>, value: Value) {
        self.columns.push((column.into(), value));
    }

    /// Builder-style [`Row::push`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(column, value.into());
        self
    }

    /// Look a column up by name.
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Iterate over `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts() -> Timestamp {
        NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap()
    }

    #[test]
    fn should_encode_timestamp_in_fixed_format() {
        let json = serde_json::to_string(&Value::Timestamp(ts())).unwrap();
        assert_eq!(json, r#""2023-01-02 03:04:05""#);
    }

    #[test]
    fn should_encode_timestamp_nested_in_rows() {
        let rows = vec![Row::new().with("id", 1).with("created_at", ts())];
        let json = serde_json::to_string(&rows).unwrap();
        assert_eq!(json, r#"[{"id":1,"created_at":"2023-01-02 03:04:05"}]"#);
    }

    #[test]
    fn should_match_standard_json_for_native_values() {
        let row = Row::new()
            .with("name", "a \"quoted\" name")
            .with("count", 3)
            .with("ratio", Value::Real(0.5))
            .with("flag", true)
            .with("missing", Value::Null);
        let expected = serde_json::json!({
            "name": "a \"quoted\" name",
            "count": 3,
            "ratio": 0.5,
            "flag": true,
            "missing": null,
        });

        let ours: serde_json::Value =
            serde_json::from_str(&serde_json::to_string(&row).unwrap()).unwrap();
        assert_eq!(ours, expected);
    }

    #[test]
    fn should_keep_column_order_when_serializing() {
        let row = Row::new().with("zeta", 1).with("alpha", 2);
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn should_find_column_by_name() {
        let row = Row::new().with("id", 9).with("username", "bob");
        assert_eq!(row.get("id"), Some(&Value::Integer(9)));
        assert_eq!(row.get("username"), Some(&Value::Text("bob".to_string())));
        assert!(row.get("nope").is_none());
    }

    #[test]
    fn should_map_none_to_null() {
        assert_eq!(Value::from(None::<String>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::Text("x".to_string()));
    }
}
