//! Raw cell values and coercion into declared field types.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;

use crate::error::CellError;

/// Ordered header -> raw value view of one data row.
///
/// Transient: built during decode/encode, handed to validators and style
/// functions, never persisted.
pub type RowValues = IndexMap<String, Value>;

/// A single raw cell value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Empty cell or blank text. Blank text counts as empty so that
    /// defaults apply to whitespace-only xlsx cells.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Short kind name for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "number",
            Self::Text(_) => "text",
            Self::DateTime(_) => "datetime",
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Empty => "empty cell".to_string(),
            Self::Text(s) => format!("text {s:?}"),
            other => format!("{} {other}", other.kind()),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Self::Empty
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Writer-side column type hint.
///
/// Advisory only: the engine never inspects it, the xlsx writer uses it to
/// pick number formats and to coerce text cells that carry numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeTag {
    Text,
    Number,
    Date,
    Bool,
}

/// Declared-type coercion from a raw cell value.
///
/// This is the record-construction side of the contract: `FieldValues::take`
/// runs these conversions when a record type is built from a decoded row.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Result<Self, CellError>;
}

impl FromValue for Value {
    fn from_value(value: Value) -> Result<Self, CellError> {
        Ok(value)
    }
}

impl FromValue for String {
    fn from_value(value: Value) -> Result<Self, CellError> {
        match value {
            Value::Empty => Err(CellError::MissingValue),
            Value::Text(s) => Ok(s),
            other => Ok(other.to_string()),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Result<Self, CellError> {
        match value {
            Value::Int(i) => Ok(i),
            Value::Float(f) if f.fract() == 0.0 => Ok(f as i64),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| CellError::coerce("integer", format!("text {s:?}"))),
            Value::Empty => Err(CellError::MissingValue),
            other => Err(CellError::coerce("integer", other.describe())),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Result<Self, CellError> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            Value::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| CellError::coerce("number", format!("text {s:?}"))),
            Value::Empty => Err(CellError::MissingValue),
            other => Err(CellError::coerce("number", other.describe())),
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Result<Self, CellError> {
        match value {
            Value::Bool(b) => Ok(b),
            Value::Int(0) => Ok(false),
            Value::Int(1) => Ok(true),
            Value::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(true),
                "false" | "no" | "0" => Ok(false),
                _ => Err(CellError::coerce("boolean", format!("text {s:?}"))),
            },
            Value::Empty => Err(CellError::MissingValue),
            other => Err(CellError::coerce("boolean", other.describe())),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(value: Value) -> Result<Self, CellError> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            Value::Text(s) => parse_datetime(s.trim())
                .ok_or_else(|| CellError::coerce("datetime", format!("text {s:?}"))),
            Value::Empty => Err(CellError::MissingValue),
            other => Err(CellError::coerce("datetime", other.describe())),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Result<Self, CellError> {
        if value.is_empty() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
