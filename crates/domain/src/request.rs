//! Request-body decoding shared by the entity request types.

use serde::de::{Deserialize, DeserializeOwned, Deserializer};

use crate::error::ValidationError;
use crate::value::Value;

/// A column assignment produced from an allow-listed request field.
///
/// `column` is always a compile-time column name, never caller input.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: &'static str,
    pub value: Value,
}

impl Assignment {
    pub fn new(column: &'static str, value: impl Into<Value>) -> Self {
        Self {
            column,
            value: value.into(),
        }
    }
}

/// Decode a JSON request body into one of the typed request structs.
///
/// # Errors
///
/// Returns [`ValidationError::MalformedBody`] when the text is not JSON, a
/// required key is absent, an unknown key is present, or a value has the
/// wrong type.
pub fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ValidationError> {
    serde_json::from_str(body).map_err(ValidationError::MalformedBody)
}

/// Deserialize a key that must be present but may be `null`.
///
/// Using `deserialize_with` turns off serde's implicit default for `Option`
/// fields, so a missing key is still reported as missing.
pub(crate) fn required_nullable<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer)
}

/// Deserialize an optional key that may also be set to `null`.
///
/// Absent → `None`, `null` → `Some(None)`, value → `Some(Some(value))`.
/// Pair with `#[serde(default)]`.
#[allow(clippy::option_option)]
pub(crate) fn nullable_patch<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Push `value` under `column` when the caller supplied it.
pub(crate) fn push_if_set<T: Into<Value>>(
    assignments: &mut Vec<Assignment>,
    column: &'static str,
    value: Option<T>,
) {
    if let Some(value) = value {
        assignments.push(Assignment::new(column, value));
    }
}
