//! JSON document widget.

use rowcast_core_widget::{Error, Row, Value, Widget};

use crate::convert::value_to_json;

/// Text holding a JSON document, cleaned into a `serde_json::Value`.
///
/// Structured input (`Map`, `Array`) converts directly without a text
/// round trip. `render` writes compact JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonWidget;

impl JsonWidget {
    pub fn new() -> Self {
        JsonWidget
    }
}

impl Widget for JsonWidget {
    type Native = serde_json::Value;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<serde_json::Value>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::String(text) => serde_json::from_str(text)
                .map(Some)
                .map_err(|e| Error::parse(format!("JSON ({})", e), text.as_str())),
            other => Ok(Some(value_to_json(other.clone()))),
        }
    }

    fn render(&self, value: Option<&serde_json::Value>) -> Result<Value, Error> {
        match value {
            Some(json) => serde_json::to_string(json)
                .map(Value::String)
                .map_err(|e| Error::InvalidRenderInput {
                    widget: "JsonWidget",
                    message: e.to_string(),
                }),
            None => Ok(Value::blank()),
        }
    }
}
