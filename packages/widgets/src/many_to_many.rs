//! Multi-reference widget.

use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::Arc;

use rowcast_core_widget::{Error, LookupKey, Query, Record, RecordKind, RecordLookup, Row, Value, Widget};

use crate::relational::{QueryStrategy, Relation};

/// Resolves a delimited list of keys to a list of records.
///
/// Text is split on the separator and each token trimmed; empty tokens
/// (`"1,"`) are skipped. A bare number is one key and an `Array` value
/// resolves element by element. Every key must match exactly one record.
/// Records come back in first-occurrence order with repeated keys
/// collapsed.
#[derive(Clone, Debug)]
pub struct ManyToManyWidget {
    relation: Relation,
    separator: Cow<'static, str>,
}

impl ManyToManyWidget {
    pub const DEFAULT_SEPARATOR: &'static str = ",";

    pub fn new(kind: RecordKind, lookup: Arc<dyn RecordLookup>) -> Self {
        ManyToManyWidget {
            relation: Relation::new(kind, lookup),
            separator: Cow::Borrowed(Self::DEFAULT_SEPARATOR),
        }
    }

    /// Match keys against `field` instead of the identity field.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.relation.set_field(field.into());
        self
    }

    pub fn with_separator(mut self, separator: impl Into<Cow<'static, str>>) -> Self {
        self.separator = separator.into();
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

    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Normalized keys in input order, empty tokens dropped.
    fn keys(&self, value: &Value) -> Result<Vec<LookupKey>, Error> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::String(text) => {
                let tokens: Vec<&str> = if self.separator.is_empty() {
                    vec![text.as_str()]
                } else {
                    text.split(self.separator()).collect()
                };
                Ok(tokens
                    .into_iter()
                    .map(LookupKey::new)
                    .filter(|key| !key.as_str().is_empty())
                    .collect())
            }
            Value::Array(items) => {
                let mut keys = Vec::with_capacity(items.len());
                for item in items {
                    keys.extend(LookupKey::normalize(item)?);
                }
                Ok(keys)
            }
            other => Ok(LookupKey::normalize(other)?.into_iter().collect()),
        }
    }
}

impl Widget for ManyToManyWidget {
    type Native = Vec<Record>;

    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Vec<Record>>, Error> {
        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for key in self.keys(value)? {
            if !seen.insert(key.clone()) {
                continue;
            }
            let record = self.relation.resolve_key(&key, row)?;
            if !records.contains(&record) {
                records.push(record);
            }
        }
        Ok(Some(records))
    }

    fn render(&self, value: Option<&Vec<Record>>) -> Result<Value, Error> {
        let Some(records) = value else {
            return Ok(Value::blank());
        };
        let parts: Vec<String> = records
            .iter()
            .map(|record| self.relation.render_field(record).to_string())
            .collect();
        Ok(Value::String(parts.join(self.separator())))
    }
}
