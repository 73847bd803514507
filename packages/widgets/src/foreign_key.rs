//! Single-reference widget.

use std::sync::Arc;

use rowcast_core_widget::{Error, LookupKey, Query, Record, RecordKind, RecordLookup, Row, Value, Widget};

use crate::relational::{QueryStrategy, Relation};

/// Resolves a key to exactly one record of a target kind.
///
/// The key is matched against the lookup field, which defaults to the
/// kind's identity field. Zero matches fail with `LookupNotFound`, several
/// with `LookupAmbiguous`. `render` hands back the record's lookup-field
/// value.
///
/// ```rust
/// use std::sync::Arc;
/// use rowcast_memory_lookup::InMemoryLookup;
/// use rowcast_widgets::{ForeignKeyWidget, Record, RecordKind, Value, Widget};
///
/// let mut lookup = InMemoryLookup::new();
/// lookup.insert("author", Record::new().with("id", 1i64).with("name", "Foo"));
///
/// let widget = ForeignKeyWidget::new(RecordKind::from_static("author"), Arc::new(lookup))
///     .with_field("name");
/// let author = widget.clean(&Value::from("Foo"), None).unwrap().unwrap();
/// assert_eq!(author.get("id"), Some(&Value::Integer(1)));
/// assert_eq!(widget.render(Some(&author)).unwrap(), Value::from("Foo"));
/// ```
#[derive(Clone, Debug)]
pub struct ForeignKeyWidget {
    relation: Relation,
}

impl ForeignKeyWidget {
    pub fn new(kind: RecordKind, lookup: Arc<dyn RecordLookup>) -> Self {
        ForeignKeyWidget {
            relation: Relation::new(kind, lookup),
        }
    }

    /// Match keys against `field` instead of the identity field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.relation.set_field(field.into());
        self
    }

    /// Replace the base query builder.
    pub fn with_strategy(mut self, strategy: impl QueryStrategy + 'static) -> Self {
        self.relation.set_strategy(Arc::new(strategy));
        self
    }

    /// Replace the base query builder with a closure.
    pub fn with_query<F>(self, build: F) -> Self
    where
        F: Fn(&RecordKind, &LookupKey, Option<&Row>) -> Result<Query, Error>
            + Send
            + Sync
            + 'static,
    {
        self.with_strategy(build)
    }

    pub fn kind(&self) -> &RecordKind {
        self.relation.kind()
    }

    pub fn field(&self) -> &str {
        self.relation.field()
    }
}

impl Widget for ForeignKeyWidget {
    type Native = Record;

    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Record>, Error> {
        self.relation.resolve(value, row)
    }

    fn render(&self, value: Option<&Record>) -> Result<Value, Error> {
        Ok(match value {
            Some(record) => self.relation.render_field(record),
            None => Value::blank(),
        })
    }
}
