//! Object-safe widgets over `Value` natives.

use chrono::FixedOffset;
use rowcast_core_widget::{Error, Row, Value, Widget};
use rowcast_widgets::AwareDateTimeWidget;

use crate::Native;

/// A widget with its native type erased to [`Value`].
///
/// `Value::Null` stands for "no value" on both sides: `clean_value` returns
/// it where `clean` returns `None`, and `render_value(&Value::Null)` is
/// `render(None)`.
///
/// # Object Safety
///
/// This trait is object-safe; [`WidgetSpec::build`](crate::WidgetSpec::build)
/// hands out `Box<dyn ErasedWidget>`.
pub trait ErasedWidget: Send + Sync {
    fn clean_value(&self, value: &Value, row: Option<&Row>) -> Result<Value, Error>;

    fn render_value(&self, value: &Value) -> Result<Value, Error>;
}

impl<W> ErasedWidget for W
where
    W: Widget,
    W::Native: Native,
{
    fn clean_value(&self, value: &Value, row: Option<&Row>) -> Result<Value, Error> {
        Ok(self
            .clean(value, row)?
            .map(Native::into_value)
            .unwrap_or(Value::Null))
    }

    fn render_value(&self, value: &Value) -> Result<Value, Error> {
        match value {
            Value::Null => self.render(None),
            other => {
                let native = W::Native::from_value(other.clone())?;
                self.render(Some(&native))
            }
        }
    }
}

/// An aware datetime widget that also renders naive datetimes.
///
/// A naive `Value::DateTime` handed to `render_value` is read as wall time
/// in the widget's zone, the same way `clean_value` reads it.
#[derive(Clone, Debug)]
pub(crate) struct LocalizingDateTime(pub(crate) AwareDateTimeWidget<FixedOffset>);

impl ErasedWidget for LocalizingDateTime {
    fn clean_value(&self, value: &Value, row: Option<&Row>) -> Result<Value, Error> {
        self.0.clean_value(value, row)
    }

    fn render_value(&self, value: &Value) -> Result<Value, Error> {
        match value {
            Value::DateTime(naive) => {
                let aware = self.0.localize(naive)?;
                self.0.render(Some(&aware))
            }
            other => self.0.render_value(other),
        }
    }
}
