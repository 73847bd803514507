//! Delimited lists of plain strings.

use std::borrow::Cow;

use rowcast_core_widget::{Error, Row, Value, Widget};

/// Splits text on a separator into a list of strings, and joins it back.
///
/// Tokens are kept verbatim: no trimming, and empty tokens stay in the list.
/// An empty separator treats the whole text as one element.
#[derive(Clone, Debug)]
pub struct SimpleArrayWidget {
    separator: Cow<'static, str>,
}

impl SimpleArrayWidget {
    pub const DEFAULT_SEPARATOR: &'static str = ",";

    /// A widget splitting on `,`.
    pub fn new() -> Self {
        SimpleArrayWidget {
            separator: Cow::Borrowed(Self::DEFAULT_SEPARATOR),
        }
    }

    pub fn with_separator(separator: impl Into<Cow<'static, str>>) -> Self {
        SimpleArrayWidget {
            separator: separator.into(),
        }
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn split(&self, text: &str) -> Vec<String> {
        if self.separator.is_empty() {
            return vec![text.to_string()];
        }
        text.split(self.separator())
            .map(str::to_string)
            .collect()
    }
}

impl Default for SimpleArrayWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for SimpleArrayWidget {
    type Native = Vec<String>;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<Vec<String>>, Error> {
        match value {
            Value::Null => Ok(Some(Vec::new())),
            Value::String(s) if s.is_empty() => Ok(Some(Vec::new())),
            Value::String(s) => Ok(Some(self.split(s))),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Array(_) | Value::Map(_) => {
                        Err(Error::unsupported("array element", item))
                    }
                    other => Ok(other.to_string()),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Value::Map(_) => Err(Error::unsupported("delimited text", value)),
            scalar => Ok(Some(self.split(&scalar.to_string()))),
        }
    }

    fn render(&self, value: Option<&Vec<String>>) -> Result<Value, Error> {
        match value {
            Some(items) => Ok(Value::String(items.join(self.separator()))),
            None => Err(Error::InvalidRenderInput {
                widget: "SimpleArrayWidget",
                message: "a missing list".to_string(),
            }),
        }
    }
}
