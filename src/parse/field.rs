//! Lenient field wrappers for hand-edited workflow JSON.
//!
//! Exported workflows are edited by hand, so one malformed field must not
//! abort the whole document. Rules that care whether a key is missing,
//! explicitly `null`, or present use [`Field`]; open property bags use
//! [`PropertyValue`].

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tri-state document field. Declare with `#[serde(default)]` so an absent
/// key becomes [`Field::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Missing,
    Null,
    /// Present, but not of the expected shape.
    Invalid(Value),
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<T> Field<T> {
    pub fn present(&self) -> Option<&T> {
        match self {
            Field::Present(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Field::Null)
    }

    /// The key exists with a non-null value, well-formed or not.
    pub fn is_set(&self) -> bool {
        matches!(self, Field::Present(_) | Field::Invalid(_))
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        if value.is_null() {
            return Ok(Field::Null);
        }
        Ok(match T::deserialize(&value) {
            Ok(v) => Field::Present(v),
            Err(_) => Field::Invalid(value),
        })
    }
}

/// `deserialize_with` helper: a value of the wrong shape becomes `None`.
pub fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).ok())
}

/// `deserialize_with` helper: a value of the wrong shape becomes `T::default()`.
pub fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}

/// Deserialize a struct from `value` only when it is a JSON object. serde
/// also reads structs from arrays positionally, which a document never means.
pub fn from_object<T: DeserializeOwned>(value: &Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    T::deserialize(value).ok()
}

/// `deserialize_with` helper for struct fields: anything but an object is
/// [`Field::Invalid`].
pub fn object<'de, D, T>(deserializer: D) -> Result<Field<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(Field::Null);
    }
    Ok(match from_object(&value) {
        Some(v) => Field::Present(v),
        None => Field::Invalid(value),
    })
}

/// `deserialize_with` helper: anything but an object becomes `T::default()`.
pub fn object_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(from_object(&value).unwrap_or_default())
}

/// `deserialize_with` helper for lists of objects. Elements are read one at
/// a time and any element that is not a well-formed object is dropped, so
/// its siblings survive. A value that is not a list is [`Field::Invalid`].
pub fn object_list<'de, D, T>(deserializer: D) -> Result<Field<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => Field::Null,
        Value::Array(items) => Field::Present(items.iter().filter_map(from_object).collect()),
        other => Field::Invalid(other),
    })
}

/// Like [`object_list`], with anything but a list read as empty.
pub fn object_list_or_default<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match object_list(deserializer)? {
        Field::Present(items) => items,
        _ => Vec::new(),
    })
}

/// Untyped property value for keys the analyzer has no schema for.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    #[default]
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<PropertyValue>),
    Map(BTreeMap<String, PropertyValue>),
}

impl PropertyValue {
    /// Truthiness as the workflow editor evaluates checkbox flags:
    /// `null`, `false`, `0`, `""` and absent keys are off.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Null => false,
            PropertyValue::Bool(b) => *b,
            PropertyValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
            PropertyValue::Text(s) => !s.is_empty(),
            PropertyValue::List(_) | PropertyValue::Map(_) => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }
}
