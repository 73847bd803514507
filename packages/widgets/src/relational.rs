//! Shared machinery for widgets that resolve keys to records.

use std::fmt;
use std::sync::Arc;

use rowcast_core_widget::{Error, LookupKey, Query, Record, RecordKind, RecordLookup, Row, Value};
use tracing::{debug, warn};

/// Builds the base query a relational widget narrows with its
/// `lookup_field == key` filter.
///
/// Any closure with the matching signature is a strategy:
///
/// ```rust
/// use rowcast_widgets::{Error, LookupKey, Query, QueryStrategy, RecordKind, Row};
///
/// let by_birthday = |kind: &RecordKind, _key: &LookupKey, row: Option<&Row>| -> Result<Query, Error> {
///     let mut query = Query::new(kind.clone());
///     if let Some(birthday) = row.and_then(|r| r.get("birthday")) {
///         if let Some(key) = LookupKey::normalize(birthday)? {
///             query = query.filter("birthday", key);
///         }
///     }
///     Ok(query)
/// };
///
/// let kind = RecordKind::from_static("author");
/// let query = by_birthday.query(&kind, &LookupKey::new("Foo"), None).unwrap();
/// assert!(query.filters().is_empty());
/// ```
pub trait QueryStrategy: Send + Sync {
    fn query(&self, kind: &RecordKind, key: &LookupKey, row: Option<&Row>)
        -> Result<Query, Error>;
}

impl<F> QueryStrategy for F
where
    F: Fn(&RecordKind, &LookupKey, Option<&Row>) -> Result<Query, Error> + Send + Sync,
{
    fn query(
        &self,
        kind: &RecordKind,
        key: &LookupKey,
        row: Option<&Row>,
    ) -> Result<Query, Error> {
        self(kind, key, row)
    }
}

/// The default strategy: every record of the target kind.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllRecords;

impl QueryStrategy for AllRecords {
    fn query(
        &self,
        kind: &RecordKind,
        _key: &LookupKey,
        _row: Option<&Row>,
    ) -> Result<Query, Error> {
        Ok(Query::new(kind.clone()))
    }
}

/// Target kind, lookup field, lookup handle and query strategy.
#[derive(Clone)]
pub(crate) struct Relation {
    kind: RecordKind,
    field: String,
    lookup: Arc<dyn RecordLookup>,
    strategy: Arc<dyn QueryStrategy>,
}

impl Relation {
    pub(crate) fn new(kind: RecordKind, lookup: Arc<dyn RecordLookup>) -> Self {
        Relation {
            field: kind.identity().to_string(),
            kind,
            lookup,
            strategy: Arc::new(AllRecords),
        }
    }

    pub(crate) fn kind(&self) -> &RecordKind {
        &self.kind
    }

    pub(crate) fn field(&self) -> &str {
        &self.field
    }

    pub(crate) fn set_field(&mut self, field: String) {
        self.field = field;
    }

    pub(crate) fn set_strategy(&mut self, strategy: Arc<dyn QueryStrategy>) {
        self.strategy = strategy;
    }

    /// Resolve a raw value. Empty values resolve to `None`.
    pub(crate) fn resolve(&self, value: &Value, row: Option<&Row>) -> Result<Option<Record>, Error> {
        match LookupKey::normalize(value)? {
            Some(key) => self.resolve_key(&key, row).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve a key to exactly one record.
    pub(crate) fn resolve_key(&self, key: &LookupKey, row: Option<&Row>) -> Result<Record, Error> {
        let query = self
            .strategy
            .query(&self.kind, key, row)?
            .filter(self.field.clone(), key.clone());
        debug!(%query, "resolving reference");

        let mut records = self.lookup.find(&query, row)?;
        match records.len() {
            0 => Err(Error::LookupNotFound {
                kind: self.kind.name().to_string(),
                field: self.field.clone(),
                key: key.to_string(),
            }),
            1 => Ok(records.remove(0)),
            count => {
                warn!(%query, count, "reference matches more than one record");
                Err(Error::LookupAmbiguous {
                    kind: self.kind.name().to_string(),
                    field: self.field.clone(),
                    key: key.to_string(),
                    count,
                })
            }
        }
    }

    /// The record's lookup-field value; blank text when the field is absent.
    pub(crate) fn render_field(&self, record: &Record) -> Value {
        match record.get(&self.field) {
            Some(value) => value.clone(),
            None => Value::blank(),
        }
    }
}

impl fmt::Debug for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Relation")
            .field("kind", &self.kind)
            .field("field", &self.field)
            .finish_non_exhaustive()
    }
}
