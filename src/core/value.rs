// Copyright 2025 Stoolap Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Value type for rowsql - scalar field values of row objects
//!
//! Rows are flat string-keyed objects; every field holds one of these
//! scalars or NULL.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::{Error, Result};
use super::types::DataType;

/// A runtime value with type information
///
/// Text uses `Arc<str>` so values can be copied between input rows, group
/// keys and output rows without reallocating.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// NULL
    #[default]
    Null,

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 text string
    Text(Arc<str>),

    /// Boolean value
    Boolean(bool),

    /// Timestamp (UTC)
    Timestamp(DateTime<Utc>),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a NULL value
    pub fn null() -> Self {
        Value::Null
    }

    /// Create an integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// Create a float value
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// Create a text value
    pub fn text(value: impl AsRef<str>) -> Self {
        Value::Text(Arc::from(value.as_ref()))
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create a timestamp value
    pub fn timestamp(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }

    // =========================================================================
    // Type accessors
    // =========================================================================

    /// Returns the data type of this value
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Null => DataType::Null,
            Value::Integer(_) => DataType::Integer,
            Value::Float(_) => DataType::Float,
            Value::Text(_) => DataType::Text,
            Value::Boolean(_) => DataType::Boolean,
            Value::Timestamp(_) => DataType::Timestamp,
        }
    }

    /// Returns true if this value is NULL
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    // =========================================================================
    // Value extractors
    // =========================================================================

    /// Extract as i64, with type coercion
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Null => None,
            Value::Integer(v) => Some(*v),
            Value::Float(v) => Some(*v as i64),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .ok()
                .or_else(|| s.trim().parse::<f64>().ok().map(|f| f as i64)),
            Value::Boolean(b) => Some(if *b { 1 } else { 0 }),
            Value::Timestamp(t) => t.timestamp_nanos_opt(),
        }
    }

    /// Extract as f64, with type coercion
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Null => None,
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Boolean(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Timestamp(_) => None,
        }
    }

    /// Extract as String, with type coercion
    pub fn as_string(&self) -> Option<String> {
        match self {
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Extract as string reference (Text only)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as DateTime<Utc>
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(*t),
            _ => None,
        }
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// The integer this numeric value is exactly equal to
    ///
    /// Integers return themselves; floats only when integral and within
    /// i64 range (`-0.0` gives 0).
    pub fn as_exact_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            Value::Float(v) => exact_integer(*v),
            _ => None,
        }
    }

    /// Compare two values for ordering
    ///
    /// Integer and Float compare numerically. NULL against a non-NULL value
    /// and values of unrelated types are not comparable.
    pub fn compare(&self, other: &Value) -> Result<Ordering> {
        match (self, other) {
            (Value::Null, Value::Null) => Ok(Ordering::Equal),
            (Value::Null, _) | (_, Value::Null) => Err(Error::type_error(
                "cannot compare NULL with non-NULL value",
            )),
            (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => Ok(compare_floats(*a, *b)),
            (Value::Integer(a), Value::Float(b)) => Ok(compare_floats(*a as f64, *b)),
            (Value::Float(a), Value::Integer(b)) => Ok(compare_floats(*a, *b as f64)),
            (Value::Text(a), Value::Text(b)) => Ok(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => Ok(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Ok(a.cmp(b)),
            (a, b) => Err(Error::type_error(format!(
                "cannot compare {} with {}",
                a.data_type(),
                b.data_type()
            ))),
        }
    }

    // =========================================================================
    // JSON conversion
    // =========================================================================

    /// Convert a JSON scalar into a Value
    ///
    /// Numbers become Integer when they fit in i64, Float otherwise. Nested
    /// arrays and objects are kept as their JSON text.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Integer(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::text(s),
            nested => Value::text(nested.to_string()),
        }
    }

    /// Convert this value into JSON
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Integer(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.to_string()),
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Timestamp(t) => serde_json::Value::String(t.to_rfc3339()),
        }
    }
}

// =========================================================================
// Trait implementations
// =========================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", format_float(*v)),
            Value::Text(s) => write!(f, "{}", s),
            Value::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // NaN equals NaN so it can be tracked as a distinct value
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::Integer(i), Value::Float(f)) | (Value::Float(f), Value::Integer(i)) => {
                exact_integer(*f) == Some(*i)
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Integer(5) == Float(5.0), so numerics hash as f64 bits
        match self {
            Value::Null => 0u8.hash(state),
            Value::Integer(v) => {
                1u8.hash(state);
                normalize_zero(*v as f64).to_bits().hash(state);
            }
            Value::Float(v) => {
                1u8.hash(state);
                normalize_zero(*v).to_bits().hash(state);
            }
            Value::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            Value::Boolean(b) => {
                3u8.hash(state);
                b.hash(state);
            }
            Value::Timestamp(t) => {
                4u8.hash(state);
                t.timestamp_nanos_opt().hash(state);
            }
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Arc::from(v.as_str()))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Arc::from(v))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

// =========================================================================
// Helper functions
// =========================================================================

/// Format a float value consistently
pub(crate) fn format_float(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        let s = format!("{:?}", v);
        if s.contains('.') && !s.contains('e') && !s.contains('E') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    }
}

/// Compare two floats, ordering NaN above every other value
fn compare_floats(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

/// The i64 equal to `v`, if there is one
///
/// Exact: `2^53 + 1` has no f64 equal to it, so no float maps to it.
fn exact_integer(v: f64) -> Option<i64> {
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    if v.fract() == 0.0 && (-BOUND..BOUND).contains(&v) {
        Some(v as i64)
    } else {
        None
    }
}

/// -0.0 == 0.0, so both must hash alike
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_constructors() {
        assert_eq!(Value::integer(42), Value::Integer(42));
        assert_eq!(Value::float(2.5), Value::Float(2.5));
        assert_eq!(Value::text("hello"), Value::Text(Arc::from("hello")));
        assert_eq!(Value::boolean(true), Value::Boolean(true));
        assert!(Value::null().is_null());
        assert!(Value::default().is_null());
    }

    #[test]
    fn test_data_type() {
        assert_eq!(Value::integer(1).data_type(), DataType::Integer);
        assert_eq!(Value::float(1.0).data_type(), DataType::Float);
        assert_eq!(Value::text("a").data_type(), DataType::Text);
        assert_eq!(Value::null().data_type(), DataType::Null);
    }

    #[test]
    fn test_as_float64() {
        assert_eq!(Value::integer(3).as_float64(), Some(3.0));
        assert_eq!(Value::text(" 2.5 ").as_float64(), Some(2.5));
        assert_eq!(Value::text("abc").as_float64(), None);
        assert_eq!(Value::boolean(true).as_float64(), Some(1.0));
        assert_eq!(Value::null().as_float64(), None);
    }

    #[test]
    fn test_as_int64() {
        assert_eq!(Value::text("12").as_int64(), Some(12));
        assert_eq!(Value::text("12.9").as_int64(), Some(12));
        assert_eq!(Value::float(3.7).as_int64(), Some(3));
        assert_eq!(Value::null().as_int64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::integer(-7).to_string(), "-7");
        assert_eq!(Value::float(3.0).to_string(), "3");
        assert_eq!(Value::float(0.25).to_string(), "0.25");
        assert_eq!(Value::boolean(false).to_string(), "false");
        assert_eq!(Value::null().to_string(), "NULL");
    }

    #[test]
    fn test_compare() {
        assert_eq!(
            Value::integer(1).compare(&Value::float(1.5)).unwrap(),
            Ordering::Less
        );
        assert_eq!(
            Value::text("b").compare(&Value::text("a")).unwrap(),
            Ordering::Greater
        );
        assert!(Value::null().compare(&Value::integer(0)).is_err());
        assert!(Value::text("1").compare(&Value::integer(1)).is_err());

        let earlier = Utc.with_ymd_and_hms(2024, 1, 15, 10, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 1, 15, 11, 0, 0).unwrap();
        assert_eq!(
            Value::timestamp(earlier)
                .compare(&Value::timestamp(later))
                .unwrap(),
            Ordering::Less
        );
    }

    #[test]
    fn test_cross_type_numeric_equality_and_hash() {
        let mut set = FxHashSet::default();
        assert!(set.insert(Value::integer(5)));
        assert!(!set.insert(Value::float(5.0)));
        assert!(set.insert(Value::text("5")));
        assert!(set.insert(Value::float(-0.0)));
        assert!(!set.insert(Value::integer(0)));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_integer_float_equality_is_exact() {
        let big = 1i64 << 53;
        assert_eq!(Value::integer(big), Value::float(big as f64));
        assert_ne!(Value::integer(big + 1), Value::float(big as f64));
        assert_ne!(Value::integer(i64::MAX), Value::float(i64::MAX as f64));
        assert_ne!(Value::integer(1), Value::float(f64::NAN));

        // DISTINCT over the same values is order independent
        let forward = [
            Value::integer(big),
            Value::integer(big + 1),
            Value::float(big as f64),
        ];
        let set: FxHashSet<Value> = forward.iter().cloned().collect();
        let reversed: FxHashSet<Value> = forward.iter().rev().cloned().collect();
        assert_eq!(set.len(), 2);
        assert_eq!(reversed.len(), 2);

        assert_eq!(Value::float(-0.0).as_exact_integer(), Some(0));
        assert_eq!(Value::float(1e15).as_exact_integer(), Some(1_000_000_000_000_000));
        assert_eq!(Value::float(0.5).as_exact_integer(), None);
        assert_eq!(Value::float(1e19).as_exact_integer(), None);
        assert_eq!(Value::text("1").as_exact_integer(), None);
    }

    #[test]
    fn test_json_conversion() {
        let json = serde_json::json!(42);
        assert_eq!(Value::from_json(&json), Value::integer(42));

        let json = serde_json::json!(1.5);
        assert_eq!(Value::from_json(&json), Value::float(1.5));

        let json = serde_json::json!([1, 2]);
        assert_eq!(Value::from_json(&json), Value::text("[1,2]"));

        assert_eq!(Value::text("x").to_json(), serde_json::json!("x"));
        assert_eq!(Value::float(f64::NAN).to_json(), serde_json::Value::Null);
    }

    #[test]
    fn test_from_option() {
        let v: Value = Some(3i64).into();
        assert_eq!(v, Value::integer(3));
        let v: Value = Option::<i64>::None.into();
        assert!(v.is_null());
    }
}
