//! The widget contract.

use std::sync::Arc;

use crate::{Error, Row, Value};

/// Convert one field between its external `Value` and a native type.
///
/// # Contract
///
/// * `clean` treats `Value::Null` and blank text as "no value" and returns
///   the widget's empty result (`None` for scalars and references, an empty
///   sequence for collections). Text that does not match the widget's
///   grammar is an error, never a silent default.
/// * `render(None)` returns empty text, except for widgets that document
///   otherwise.
/// * For every value `v` that `clean` produces from well-formed input,
///   `clean(render(v))` gives back `v`.
///
/// Widgets hold configuration only, so one instance can serve many rows and
/// many threads.
pub trait Widget: Send + Sync {
    /// The attribute type this widget produces.
    type Native;

    /// External value to native value.
    ///
    /// `row` holds the sibling values of the row being converted, for
    /// widgets whose result depends on them.
    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Self::Native>, Error>;

    /// Native value to external value.
    fn render(&self, value: Option<&Self::Native>) -> Result<Value, Error>;
}

impl<W: Widget + ?Sized> Widget for &W {
    type Native = W::Native;

    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Self::Native>, Error> {
        (**self).clean(value, row)
    }

    fn render(&self, value: Option<&Self::Native>) -> Result<Value, Error> {
        (**self).render(value)
    }
}

impl<W: Widget + ?Sized> Widget for Box<W> {
    type Native = W::Native;

    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Self::Native>, Error> {
        self.as_ref().clean(value, row)
    }

    fn render(&self, value: Option<&Self::Native>) -> Result<Value, Error> {
        self.as_ref().render(value)
    }
}

impl<W: Widget + ?Sized> Widget for Arc<W> {
    type Native = W::Native;

    fn clean(&self, value: &Value, row: Option<&Row>) -> Result<Option<Self::Native>, Error> {
        self.as_ref().clean(value, row)
    }

    fn render(&self, value: Option<&Self::Native>) -> Result<Value, Error> {
        self.as_ref().render(value)
    }
}
