//! Records, record kinds and row context.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use crate::Value;

/// Names a kind of record in the external store, together with the name of
/// its identity field.
///
/// Uses `Cow<'static, str>` so kinds can be declared as constants:
///
/// ```rust
/// use rowcast_core_widget::RecordKind;
///
/// const AUTHOR: RecordKind = RecordKind::from_static("author");
/// assert_eq!(AUTHOR.identity(), "id");
///
/// let isbn_keyed = RecordKind::new("book").with_identity("isbn");
/// assert_eq!(isbn_keyed.identity(), "isbn");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RecordKind {
    name: Cow<'static, str>,
    identity: Cow<'static, str>,
}

impl RecordKind {
    /// Identity field used unless one is given.
    pub const DEFAULT_IDENTITY: &'static str = "id";

    /// Create a kind from a static name, identified by `id`.
    pub const fn from_static(name: &'static str) -> Self {
        RecordKind {
            name: Cow::Borrowed(name),
            identity: Cow::Borrowed(Self::DEFAULT_IDENTITY),
        }
    }

    /// Create a kind from an owned name, identified by `id`.
    pub fn new(name: impl Into<String>) -> Self {
        RecordKind {
            name: Cow::Owned(name.into()),
            identity: Cow::Borrowed(Self::DEFAULT_IDENTITY),
        }
    }

    /// Use a different identity field.
    pub fn with_identity(mut self, identity: impl Into<Cow<'static, str>>) -> Self {
        self.identity = identity.into();
        self
    }

    /// The kind's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the identity field.
    pub fn identity(&self) -> &str {
        &self.identity
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A record returned by a `RecordLookup`: named fields, readable by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with no fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Read a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.into(), value.into())
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Record { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Record {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The raw external values of the row currently being converted.
///
/// Passed through `clean` so a widget's lookup can depend on sibling fields.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Row {
    values: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a sibling value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(field.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for Row {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Row { values }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
