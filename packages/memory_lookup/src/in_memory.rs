//! Record tables held in memory.

use std::collections::BTreeMap;

use rowcast_core_widget::{Error, Query, Record, RecordLookup, Row};
use tracing::trace;

/// Records grouped by kind name, kept in insertion order.
///
/// `find` scans the records of the query's kind and returns, in insertion
/// order, those matching every filter. Keys are compared in the type of
/// the stored field, so a record stored with `id = 1` answers a query for
/// `"1"` or `1.0`, and one stored with `price = 1.50` answers `"1.50"`.
/// Unknown kinds answer with no records.
///
/// # Example
///
/// ```rust
/// use rowcast_memory_lookup::InMemoryLookup;
/// use rowcast_core_widget::{LookupKey, Query, Record, RecordKind, RecordLookup};
///
/// let lookup = InMemoryLookup::new().with_records(
///     "category",
///     vec![
///         Record::new().with("id", 1i64).with("name", "Cat 1"),
///         Record::new().with("id", 2i64).with("name", "Cat 2"),
///     ],
/// );
///
/// let query = Query::new(RecordKind::from_static("category"))
///     .filter("name", LookupKey::new("Cat 2"));
/// let found = lookup.find(&query, None).unwrap();
/// assert_eq!(found.len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryLookup {
    tables: BTreeMap<String, Vec<Record>>,
}

impl InMemoryLookup {
    /// Create a lookup with no records.
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
        }
    }

    /// Append a record of `kind`.
    pub fn insert(&mut self, kind: impl Into<String>, record: Record) {
        self.tables.entry(kind.into()).or_default().push(record);
    }

    /// Append several records of `kind`.
    pub fn with_records(
        mut self,
        kind: impl Into<String>,
        records: impl IntoIterator<Item = Record>,
    ) -> Self {
        self.tables.entry(kind.into()).or_default().extend(records);
        self
    }

    /// Records of `kind` in insertion order.
    pub fn records(&self, kind: &str) -> &[Record] {
        self.tables.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of records across kinds.
    pub fn len(&self) -> usize {
        self.tables.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordLookup for InMemoryLookup {
    fn find(&self, query: &Query, _row: Option<&Row>) -> Result<Vec<Record>, Error> {
        let found: Vec<Record> = self
            .records(query.kind().name())
            .iter()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        trace!(%query, matches = found.len(), "in-memory lookup");
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collection_literals::btree;
    use rowcast_core_widget::{LookupKey, RecordKind, Value};

    fn authors() -> InMemoryLookup {
        InMemoryLookup::new().with_records(
            "author",
            vec![
                Record::from(btree! {
                    "id".to_string() => Value::Integer(1),
                    "name".to_string() => Value::from("Foo"),
                }),
                Record::from(btree! {
                    "id".to_string() => Value::Integer(2),
                    "name".to_string() => Value::from("Foo"),
                    "birthday".to_string() => Value::from("2016-01-01"),
                }),
            ],
        )
    }

    fn query(kind: &'static str) -> Query {
        Query::new(RecordKind::from_static(kind))
    }

    #[test]
    fn empty_query_returns_whole_kind_in_order() {
        let lookup = authors();
        let found = lookup.find(&query("author"), None).unwrap();
        let ids: Vec<_> = found.iter().map(|r| r.get("id").cloned()).collect();
        assert_eq!(ids, vec![Some(Value::Integer(1)), Some(Value::Integer(2))]);
    }

    #[test]
    fn filters_are_conjunctive() {
        let lookup = authors();
        let q = query("author")
            .filter("name", LookupKey::new("Foo"))
            .filter("birthday", LookupKey::new("2016-01-01"));
        let found = lookup.find(&q, None).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get("id"), Some(&Value::Integer(2)));
    }

    #[test]
    fn keys_match_across_spellings() {
        let lookup = authors();
        let q = query("author").filter("id", LookupKey::normalize(&Value::Float(1.0)).unwrap().unwrap());
        assert_eq!(lookup.find(&q, None).unwrap().len(), 1);
    }

    #[test]
    fn missing_field_never_matches() {
        let lookup = authors();
        let q = query("author").filter("email", LookupKey::new("x"));
        assert!(lookup.find(&q, None).unwrap().is_empty());
    }

    #[test]
    fn unknown_kind_is_empty() {
        let lookup = authors();
        assert!(lookup.find(&query("book"), None).unwrap().is_empty());
        assert!(lookup.records("book").is_empty());
    }

    #[test]
    fn insert_appends() {
        let mut lookup = InMemoryLookup::new();
        assert!(lookup.is_empty());
        lookup.insert("category", Record::new().with("id", 1i64));
        lookup.insert("category", Record::new().with("id", 2i64));
        lookup.insert("author", Record::new().with("id", 1i64));
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.records("category").len(), 2);
    }
}
