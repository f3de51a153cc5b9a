use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Canonical textual form used when a `Date` cell is rendered.
pub const DATE_RENDER_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Null,
    Boolean,
    Integer,
    Float,
    Date,
    String,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogicalType::Null => "Null",
            LogicalType::Boolean => "Boolean",
            LogicalType::Integer => "Integer",
            LogicalType::Float => "Float",
            LogicalType::Date => "Date",
            LogicalType::String => "String",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single table cell.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Date(NaiveDate),
    Utf8(String),
}

impl ScalarValue {
    pub fn logical_type(&self) -> LogicalType {
        match self {
            ScalarValue::Null => LogicalType::Null,
            ScalarValue::Boolean(_) => LogicalType::Boolean,
            ScalarValue::Int64(_) => LogicalType::Integer,
            ScalarValue::Float64(_) => LogicalType::Float,
            ScalarValue::Date(_) => LogicalType::Date,
            ScalarValue::Utf8(_) => LogicalType::String,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Date(d) => JsonValue::String(d.format(DATE_RENDER_FORMAT).to_string()),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ScalarValue::Int64(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view of the cell. Strings are not coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float64(f) => Some(*f),
            ScalarValue::Int64(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Convert to string representation directly (no JsonValue intermediate)
    pub fn to_string_repr(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Boolean(b) => b.to_string(),
            ScalarValue::Int64(i) => i.to_string(),
            ScalarValue::Float64(f) => f.to_string(),
            ScalarValue::Date(d) => d.format(DATE_RENDER_FORMAT).to_string(),
            ScalarValue::Utf8(s) => s.clone(),
        }
    }

    /// Compares two non-null values of compatible types.
    ///
    /// Integers and floats compare numerically with each other. Any other
    /// cross-type comparison, or a comparison involving `Null`, yields `None`.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Null, _) | (_, ScalarValue::Null) => None,
            (ScalarValue::Int64(a), ScalarValue::Int64(b)) => Some(a.cmp(b)),
            (ScalarValue::Boolean(a), ScalarValue::Boolean(b)) => Some(a.cmp(b)),
            (ScalarValue::Date(a), ScalarValue::Date(b)) => Some(a.cmp(b)),
            (ScalarValue::Utf8(a), ScalarValue::Utf8(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }

    /// Equality used by slicing: numeric widening, `Null` never matches.
    pub fn matches(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("null"),
            other => f.write_str(&other.to_string_repr()),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        ScalarValue::Boolean(value)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(value: NaiveDate) -> Self {
        ScalarValue::Date(value)
    }
}

impl TryFrom<JsonValue> for ScalarValue {
    type Error = String;

    /// Converts a flat JSON value. Arrays and objects are rejected so that
    /// callers can tell a scalar apart from a list of scalars.
    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::Null => Ok(ScalarValue::Null),
            JsonValue::Bool(b) => Ok(ScalarValue::Boolean(b)),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    Ok(ScalarValue::Int64(i))
                } else if let Some(f) = num.as_f64() {
                    Ok(ScalarValue::Float64(f))
                } else {
                    Err(format!("Unsupported number: {num}"))
                }
            }
            JsonValue::String(s) => Ok(ScalarValue::Utf8(s)),
            JsonValue::Array(_) => Err("expected a scalar, found an array".to_string()),
            JsonValue::Object(_) => Err("expected a scalar, found an object".to_string()),
        }
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::Null => serializer.serialize_unit(),
            ScalarValue::Boolean(b) => serializer.serialize_bool(*b),
            ScalarValue::Int64(i) => serializer.serialize_i64(*i),
            ScalarValue::Float64(f) => serializer.serialize_f64(*f),
            ScalarValue::Date(d) => {
                serializer.serialize_str(&d.format(DATE_RENDER_FORMAT).to_string())
            }
            ScalarValue::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ScalarValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        ScalarValue::try_from(json).map_err(D::Error::custom)
    }
}

/// Hashable, totally ordered form of a cell, used as a group-by key part.
///
/// Ordering: nulls first, then booleans, numbers, dates and strings. Integers
/// and floats order numerically against each other but remain distinct keys.
#[derive(Clone, Debug)]
pub enum GroupValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Str(String),
}

impl GroupValue {
    fn rank(&self) -> u8 {
        match self {
            GroupValue::Null => 0,
            GroupValue::Bool(_) => 1,
            GroupValue::Int(_) | GroupValue::Float(_) => 2,
            GroupValue::Date(_) => 3,
            GroupValue::Str(_) => 4,
        }
    }

    pub fn into_scalar(self) -> ScalarValue {
        match self {
            GroupValue::Null => ScalarValue::Null,
            GroupValue::Bool(b) => ScalarValue::Boolean(b),
            GroupValue::Int(i) => ScalarValue::Int64(i),
            GroupValue::Float(f) => ScalarValue::Float64(f),
            GroupValue::Date(d) => ScalarValue::Date(d),
            GroupValue::Str(s) => ScalarValue::Utf8(s),
        }
    }
}

impl From<&ScalarValue> for GroupValue {
    fn from(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Null => GroupValue::Null,
            ScalarValue::Boolean(b) => GroupValue::Bool(*b),
            ScalarValue::Int64(i) => GroupValue::Int(*i),
            ScalarValue::Float64(f) => GroupValue::Float(canonical_float(*f)),
            ScalarValue::Date(d) => GroupValue::Date(*d),
            ScalarValue::Utf8(s) => GroupValue::Str(s.clone()),
        }
    }
}

/// Folds `-0.0` into `0.0` and every NaN payload into one NaN so that equal
/// floats land in the same group.
fn canonical_float(f: f64) -> f64 {
    if f == 0.0 {
        0.0
    } else if f.is_nan() {
        f64::NAN
    } else {
        f
    }
}

impl Ord for GroupValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (GroupValue::Bool(a), GroupValue::Bool(b)) => a.cmp(b),
            (GroupValue::Int(a), GroupValue::Int(b)) => a.cmp(b),
            (GroupValue::Float(a), GroupValue::Float(b)) => a.total_cmp(b),
            // Mixed numbers: numeric order, ties broken with ints first
            (GroupValue::Int(a), GroupValue::Float(b)) => {
                (*a as f64).total_cmp(b).then(Ordering::Less)
            }
            (GroupValue::Float(a), GroupValue::Int(b)) => {
                a.total_cmp(&(*b as f64)).then(Ordering::Greater)
            }
            (GroupValue::Date(a), GroupValue::Date(b)) => a.cmp(b),
            (GroupValue::Str(a), GroupValue::Str(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for GroupValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for GroupValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupValue {}

impl Hash for GroupValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u8(self.rank());
        match self {
            GroupValue::Null => {}
            GroupValue::Bool(b) => b.hash(state),
            GroupValue::Int(i) => {
                state.write_u8(0);
                i.hash(state);
            }
            GroupValue::Float(f) => {
                state.write_u8(1);
                f.to_bits().hash(state);
            }
            GroupValue::Date(d) => d.hash(state),
            GroupValue::Str(s) => s.hash(state),
        }
    }
}
