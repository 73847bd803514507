//! The Value type - one external field value.
//!
//! A `Value` is what sits in a cell of a flat file or a column of an
//! export: text, a primitive number, a delimited list. It also carries the
//! native temporal and decimal types so that already-converted values can
//! pass back through `clean` unchanged.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::Decimal;

/// A single external field value.
///
/// # Design Notes
///
/// - `Null` is "no value". Blank text is treated the same way by most widgets.
/// - Uses `BTreeMap` for deterministic ordering of structured values
/// - Uses `i64` for integers, matching most tabular formats
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed 64-bit integer.
    Integer(i64),
    /// 64-bit floating point.
    Float(f64),
    /// UTF-8 text.
    String(String),
    /// Exact base-10 number.
    Decimal(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Wall-clock time of day.
    Time(NaiveTime),
    /// Date and time without a timezone.
    DateTime(NaiveDateTime),
    /// Date and time pinned to a UTC offset.
    DateTimeTz(DateTime<FixedOffset>),
    /// Elapsed time.
    Duration(TimeDelta),
    /// Ordered sequence of values.
    Array(Vec<Value>),
    /// Key-value map with string keys.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Create a null value.
    pub fn null() -> Self {
        Value::Null
    }

    /// The canonical "empty" rendering: empty text.
    pub fn blank() -> Self {
        Value::String(String::new())
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value means "no value": null, or text that is blank
    /// after trimming.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Borrow the text if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Text form of any non-null value.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Short name of the variant, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Decimal(_) => "decimal",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::DateTime(_) => "datetime",
            Value::DateTimeTz(_) => "datetime with offset",
            Value::Duration(_) => "duration",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::String(s) => f.write_str(s),
            Value::Decimal(d) => write!(f, "{}", d),
            Value::Date(d) => write!(f, "{}", d),
            Value::Time(t) => write!(f, "{}", t),
            Value::DateTime(dt) => write!(f, "{}", dt),
            Value::DateTimeTz(dt) => write!(f, "{}", dt),
            Value::Duration(d) => write!(f, "{}", d),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
            Value::Map(map) => {
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}={}", k, v)?;
                }
                Ok(())
            }
        }
    }
}

// Conversion from common types

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
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

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTimeTz(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::Duration(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Array(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;

    #[test]
    fn empty_covers_null_and_blank_text() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::from("   ").is_empty());
        assert!(!Value::from("0").is_empty());
        assert!(!Value::Integer(0).is_empty());
        assert!(!Value::Bool(false).is_empty());
    }

    #[test]
    fn blank_is_empty_text() {
        assert_eq!(Value::blank(), Value::String(String::new()));
    }

    #[test]
    fn as_text_borrows_strings() {
        let v = Value::from("asdf");
        assert!(matches!(v.as_text(), Some(Cow::Borrowed("asdf"))));
        assert_eq!(Value::Integer(12).as_text().unwrap(), "12");
        assert_eq!(Value::Null.as_text(), None);
    }

    #[test]
    fn display_scalars() {
        assert_eq!(Value::Float(1.0 / 3.0).to_string(), "0.3333333333333333");
        assert_eq!(
            Value::Date(NaiveDate::from_ymd_opt(1868, 8, 13).unwrap()).to_string(),
            "1868-08-13"
        );
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn display_containers() {
        let arr = Value::from(vec!["a", "b"]);
        assert_eq!(arr.to_string(), "a,b");

        let map = Value::Map(btree! {
            "a".to_string() => Value::Integer(1),
            "b".to_string() => Value::from("x"),
        });
        assert_eq!(map.to_string(), "a=1,b=x");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(Value::from(Some(3i64)), Value::Integer(3));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn kind_names() {
        assert_eq!(Value::Null.kind_name(), "null");
        assert_eq!(Value::Map(BTreeMap::new()).kind_name(), "map");
        assert_eq!(Value::Duration(TimeDelta::zero()).kind_name(), "duration");
    }
}
