//! Widget natives carried as `Value`.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rowcast_core_widget::{Decimal, Error, Record, Value};

use crate::convert::{json_to_value, value_to_json};

/// A native widget type that can travel as a [`Value`].
///
/// `into_value` never fails. `from_value` accepts the variant `into_value`
/// produces plus the obvious text or numeric spellings; anything else is an
/// `UnsupportedValue` error.
pub trait Native: Sized {
    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, Error>;
}

impl Native for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(Error::unsupported("bool", &other)),
        }
    }
}

impl Native for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Integer(i) => Ok(i),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
            other => Err(Error::unsupported("integer", &other)),
        }
    }
}

impl Native for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Integer(i) => Ok(i as f64),
            Value::Decimal(d) => Ok(d.to_f64()),
            other => Err(Error::unsupported("float", &other)),
        }
    }
}

impl Native for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::String(s) => Ok(s),
            Value::Array(_) | Value::Map(_) => Err(Error::unsupported("text", &value)),
            scalar => Ok(scalar.to_string()),
        }
    }
}

impl Native for Decimal {
    fn into_value(self) -> Value {
        Value::Decimal(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Decimal(d) => Ok(d),
            Value::Integer(i) => Ok(Decimal::from(i)),
            Value::Float(f) => Decimal::from_f64(f),
            Value::String(s) => s.parse(),
            other => Err(Error::unsupported("decimal", &other)),
        }
    }
}

impl Native for NaiveDate {
    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Date(d) => Ok(d),
            Value::String(s) => s.parse().map_err(|_| Error::parse("ISO date", s)),
            other => Err(Error::unsupported("date", &other)),
        }
    }
}

impl Native for NaiveTime {
    fn into_value(self) -> Value {
        Value::Time(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Time(t) => Ok(t),
            Value::String(s) => s.parse().map_err(|_| Error::parse("ISO time", s)),
            other => Err(Error::unsupported("time", &other)),
        }
    }
}

impl Native for NaiveDateTime {
    fn into_value(self) -> Value {
        Value::DateTime(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::DateTime(dt) => Ok(dt),
            Value::String(s) => s.parse().map_err(|_| Error::parse("ISO datetime", s)),
            other => Err(Error::unsupported("datetime", &other)),
        }
    }
}

impl Native for DateTime<FixedOffset> {
    fn into_value(self) -> Value {
        Value::DateTimeTz(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::DateTimeTz(dt) => Ok(dt),
            Value::String(s) => {
                DateTime::parse_from_rfc3339(&s).map_err(|_| Error::parse("RFC 3339 datetime", s))
            }
            other => Err(Error::unsupported("datetime with offset", &other)),
        }
    }
}

impl Native for TimeDelta {
    fn into_value(self) -> Value {
        Value::Duration(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Duration(d) => Ok(d),
            Value::Integer(i) => {
                TimeDelta::try_seconds(i).ok_or_else(|| Error::parse("duration", i.to_string()))
            }
            other => Err(Error::unsupported("duration", &other)),
        }
    }
}

impl Native for Record {
    fn into_value(self) -> Value {
        Value::Map(self.into_fields())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Map(fields) => Ok(Record::from(fields)),
            other => Err(Error::unsupported("record", &other)),
        }
    }
}

impl Native for serde_json::Value {
    fn into_value(self) -> Value {
        json_to_value(self)
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        Ok(value_to_json(value))
    }
}

impl<T: Native> Native for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(Native::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, Error> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            other => Err(Error::unsupported("array", &other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(i64::from_value(Value::Float(3.0)).unwrap(), 3);
        assert!(i64::from_value(Value::Float(3.5)).is_err());
        assert_eq!(f64::from_value(Value::Integer(2)).unwrap(), 2.0);
        assert_eq!(String::from_value(Value::Integer(2)).unwrap(), "2");
        assert!(bool::from_value(Value::from("true")).is_err());
    }

    #[test]
    fn decimals_from_text() {
        let d = Decimal::from_value(Value::from("1.50")).unwrap();
        assert_eq!(d.to_string(), "1.50");
        assert!(Decimal::from_value(Value::from("x")).is_err());
    }

    #[test]
    fn dates_from_iso_text() {
        let d = NaiveDate::from_value(Value::from("2012-08-13")).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2012, 8, 13).unwrap());
        let dt = DateTime::<FixedOffset>::from_value(Value::from("2012-08-13T10:00:00+02:00"))
            .unwrap();
        assert_eq!(dt.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn records_are_maps() {
        let record = Record::new().with("id", 1i64);
        let value = record.clone().into_value();
        assert!(matches!(value, Value::Map(_)));
        assert_eq!(Record::from_value(value).unwrap(), record);
        assert!(Record::from_value(Value::Integer(1)).is_err());
    }

    #[test]
    fn vectors_are_arrays() {
        let strings = vec!["a".to_string(), "b".to_string()];
        let value = strings.clone().into_value();
        assert_eq!(Vec::<String>::from_value(value).unwrap(), strings);
        assert!(Vec::<Record>::from_value(Value::Array(vec![Value::Integer(1)])).is_err());
    }
}
