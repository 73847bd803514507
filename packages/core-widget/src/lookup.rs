//! The record lookup capability consumed by relational widgets.

use std::fmt;
use std::sync::Arc;

use crate::{Decimal, Error, Record, RecordKind, Row, Value};

/// Canonical form of an external key.
///
/// Tabular inputs spell the same key many ways: `1`, `1.0`, `"1"`,
/// `" 1 "`. Normalizing both the incoming key and the stored field value to
/// a `LookupKey` makes them compare equal without each lookup backend
/// reimplementing the coercion rules.
///
/// | input | key |
/// |---|---|
/// | `String` | trimmed text (blank is no key) |
/// | `Integer` | decimal digits |
/// | `Float` | integer digits when integral, shortest text otherwise |
/// | `Bool` | `"1"` / `"0"` |
/// | `Decimal` | normalized text (`1.50` -> `"1.5"`) |
/// | `Date`, `Time`, `DateTime` | ISO 8601 text |
/// | `Null` | no key |
///
/// Anything else is an `UnsupportedValue` error.
///
/// Matching a key against a stored field goes through
/// [`LookupKey::matches_value`], which compares in the field's own type.
/// A decimal field holding `1.50` therefore matches both `"1.5"` and
/// `"1.50"`, and a boolean field matches `"1"` as well as `"true"`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupKey(String);

impl LookupKey {
    /// Build a key from text, trimming surrounding whitespace.
    pub fn new(text: impl AsRef<str>) -> Self {
        LookupKey(text.as_ref().trim().to_string())
    }

    /// Normalize an external value. `Ok(None)` means the value is empty.
    pub fn normalize(value: &Value) -> Result<Option<LookupKey>, Error> {
        let key = match value {
            Value::Null => return Ok(None),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed.to_string()
            }
            Value::Integer(i) => i.to_string(),
            Value::Float(f) if !f.is_finite() => {
                return Err(Error::parse("finite lookup key", f.to_string()))
            }
            Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                (*f as i64).to_string()
            }
            Value::Float(f) => f.to_string(),
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_string(),
            Value::Decimal(d) => d.normalize().to_string(),
            Value::Date(d) => d.to_string(),
            Value::Time(t) => t.to_string(),
            Value::DateTime(dt) => dt.to_string(),
            other => return Err(Error::unsupported("scalar lookup key", other)),
        };
        Ok(Some(LookupKey(key)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether a stored field value equals this key.
    ///
    /// Numbers and booleans are compared by value after reading the key in
    /// the field's type; other fields compare by normalized text. A value
    /// that cannot be normalized never matches.
    pub fn matches_value(&self, value: &Value) -> bool {
        let text = self.as_str();
        match value {
            Value::Decimal(d) => text.parse::<Decimal>().is_ok_and(|k| k == *d),
            Value::Integer(i) => {
                text == i.to_string()
                    || text.parse::<Decimal>().is_ok_and(|k| k == Decimal::from(*i))
            }
            Value::Float(f) => text.parse::<f64>().is_ok_and(|k| k == *f),
            Value::Bool(b) => match text.to_ascii_lowercase().as_str() {
                "1" | "true" => *b,
                "0" | "false" => !*b,
                _ => false,
            },
            other => LookupKey::normalize(other)
                .ok()
                .flatten()
                .is_some_and(|k| k == *self),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One `field == key` condition.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub field: String,
    pub key: LookupKey,
}

impl Filter {
    /// Check whether `record` satisfies this filter.
    ///
    /// A missing field never matches. See [`LookupKey::matches_value`] for
    /// how the key is compared with the stored value.
    pub fn matches(&self, record: &Record) -> bool {
        record
            .get(&self.field)
            .is_some_and(|v| self.key.matches_value(v))
    }
}

/// A conjunctive equality query against one record kind.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    kind: RecordKind,
    filters: Vec<Filter>,
}

impl Query {
    /// Query every record of `kind`.
    pub fn new(kind: RecordKind) -> Self {
        Query {
            kind,
            filters: Vec::new(),
        }
    }

    /// Add a `field == key` condition.
    pub fn filter(mut self, field: impl Into<String>, key: LookupKey) -> Self {
        self.filters.push(Filter {
            field: field.into(),
            key,
        });
        self
    }

    pub fn kind(&self) -> &RecordKind {
        &self.kind
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Check whether `record` satisfies every filter.
    pub fn matches(&self, record: &Record) -> bool {
        self.filters.iter().all(|f| f.matches(record))
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        for (i, filter) in self.filters.iter().enumerate() {
            let sep = if i == 0 { " where " } else { " and " };
            write!(f, "{}{} = {:?}", sep, filter.field, filter.key.as_str())?;
        }
        Ok(())
    }
}

/// Resolve queries to records.
///
/// This is the only collaborator a widget talks to. Implementations are
/// expected to answer fast point or range queries against an already-open
/// data source.
///
/// # Object Safety
///
/// This trait is object-safe: relational widgets hold an
/// `Arc<dyn RecordLookup>`.
pub trait RecordLookup: Send + Sync {
    /// Find every record matching `query`.
    ///
    /// `row` is the row context of the conversion that triggered the
    /// lookup; most backends ignore it.
    ///
    /// # Returns
    ///
    /// * `Ok(vec![])` - Nothing matches.
    /// * `Ok(records)` - The matching records.
    /// * `Err(Error)` - The backend failed.
    fn find(&self, query: &Query, row: Option<&Row>) -> Result<Vec<Record>, Error>;
}

// Blanket implementations for references and smart pointers

impl<T: RecordLookup + ?Sized> RecordLookup for &T {
    fn find(&self, query: &Query, row: Option<&Row>) -> Result<Vec<Record>, Error> {
        (**self).find(query, row)
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for Box<T> {
    fn find(&self, query: &Query, row: Option<&Row>) -> Result<Vec<Record>, Error> {
        self.as_ref().find(query, row)
    }
}

impl<T: RecordLookup + ?Sized> RecordLookup for Arc<T> {
    fn find(&self, query: &Query, row: Option<&Row>) -> Result<Vec<Record>, Error> {
        self.as_ref().find(query, row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Lookup over a fixed list of records.
    struct ListLookup {
        records: Vec<Record>,
    }

    impl RecordLookup for ListLookup {
        fn find(&self, query: &Query, _row: Option<&Row>) -> Result<Vec<Record>, Error> {
            Ok(self
                .records
                .iter()
                .filter(|r| query.matches(r))
                .cloned()
                .collect())
        }
    }

    fn key(v: impl Into<Value>) -> Option<LookupKey> {
        LookupKey::normalize(&v.into()).unwrap()
    }

    #[test]
    fn normalize_numbers() {
        assert_eq!(key(1i64), Some(LookupKey::new("1")));
        assert_eq!(key(1.0), Some(LookupKey::new("1")));
        assert_eq!(key(-2.0), Some(LookupKey::new("-2")));
        assert_eq!(key(1.5), Some(LookupKey::new("1.5")));
        assert_eq!(key(true), Some(LookupKey::new("1")));
        assert_eq!(
            key("1.50".parse::<crate::Decimal>().unwrap()),
            Some(LookupKey::new("1.5"))
        );
    }

    #[test]
    fn normalize_text() {
        assert_eq!(key(" 12 "), Some(LookupKey::new("12")));
        assert_eq!(key("Cat úňíčóďě"), Some(LookupKey::new("Cat úňíčóďě")));
        assert_eq!(key(""), None);
        assert_eq!(key("  "), None);
        assert_eq!(LookupKey::normalize(&Value::Null).unwrap(), None);
    }

    #[test]
    fn normalize_rejects_structures() {
        let result = LookupKey::normalize(&Value::Array(vec![Value::Integer(1)]));
        assert!(matches!(result, Err(Error::UnsupportedValue { .. })));
        assert!(LookupKey::normalize(&Value::Float(f64::NAN)).is_err());
    }

    #[test]
    fn dates_match_their_iso_text() {
        let date = chrono::NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        assert_eq!(key(date), Some(LookupKey::new("2016-01-01")));
    }

    #[test]
    fn filter_matches_across_spellings() {
        let record = Record::new().with("id", 1i64);
        let filter = Filter {
            field: "id".to_string(),
            key: LookupKey::new("1"),
        };
        assert!(filter.matches(&record));
        assert!(!filter.matches(&Record::new().with("id", 2i64)));
        assert!(!filter.matches(&Record::new()));
    }

    #[test]
    fn keys_compare_in_the_field_type() {
        let price = Value::Decimal("1.50".parse::<Decimal>().unwrap());
        assert!(LookupKey::new("1.50").matches_value(&price));
        assert!(LookupKey::new("1.5").matches_value(&price));
        assert!(!LookupKey::new("1.51").matches_value(&price));
        assert!(!LookupKey::new("abc").matches_value(&price));

        let flag = Value::Bool(true);
        assert!(LookupKey::new("true").matches_value(&flag));
        assert!(LookupKey::new("1").matches_value(&flag));
        assert!(!LookupKey::new("false").matches_value(&flag));
        assert!(LookupKey::new("False").matches_value(&Value::Bool(false)));

        assert!(LookupKey::new("10.0").matches_value(&Value::Integer(10)));
        assert!(LookupKey::new("1e1").matches_value(&Value::Integer(10)));
        assert!(!LookupKey::new("10.5").matches_value(&Value::Integer(10)));
        assert!(LookupKey::new("10.50").matches_value(&Value::Float(10.5)));
        assert!(!LookupKey::new("1").matches_value(&Value::Null));
    }

    #[test]
    fn rendered_decimal_and_bool_fields_match_back() {
        let record = Record::new()
            .with("price", "10.50".parse::<Decimal>().unwrap())
            .with("active", true);
        for (field, rendered) in [
            ("price", record.get("price").unwrap().to_string()),
            ("active", record.get("active").unwrap().to_string()),
        ] {
            let filter = Filter {
                field: field.to_string(),
                key: LookupKey::new(&rendered),
            };
            assert!(filter.matches(&record), "{} = {:?}", field, rendered);
        }
    }

    #[test]
    fn query_is_conjunctive() {
        let query = Query::new(RecordKind::from_static("author"))
            .filter("name", LookupKey::new("Foo"))
            .filter("birthday", LookupKey::new("2016-01-01"));

        let both = Record::new().with("name", "Foo").with("birthday", "2016-01-01");
        let one = Record::new().with("name", "Foo");
        assert!(query.matches(&both));
        assert!(!query.matches(&one));
        assert_eq!(
            query.to_string(),
            "author where name = \"Foo\" and birthday = \"2016-01-01\""
        );
    }

    #[test]
    fn object_safety_works() {
        let lookup = ListLookup {
            records: vec![Record::new().with("id", 1i64)],
        };
        let shared: Arc<dyn RecordLookup> = Arc::new(lookup);
        let query = Query::new(RecordKind::from_static("x")).filter("id", LookupKey::new("1"));

        assert_eq!(shared.find(&query, None).unwrap().len(), 1);
        assert_eq!((&shared).find(&query, None).unwrap().len(), 1);
    }
}
