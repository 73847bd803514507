//! Declarative widget configuration.

use std::sync::Arc;

use chrono::FixedOffset;
use rowcast_core_widget::{Error, RecordKind, RecordLookup};
use rowcast_widgets::{
    BooleanWidget, CharWidget, DateTimeWidget, DateWidget, DecimalWidget, DurationWidget,
    FloatWidget, ForeignKeyWidget, IntegerWidget, ManyToManyWidget, SimpleArrayWidget,
    TemporalFormat, TimeWidget,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::erased::LocalizingDateTime;
use crate::{ErasedWidget, JsonWidget};

/// A widget described as data, tagged by `"type"`.
///
/// ```json
/// {"type": "datetime", "formats": ["%d.%m.%Y %H:%M"], "timezone": "+02:00"}
/// {"type": "many_to_many", "kind": "category", "field": "name", "separator": ";"}
/// ```
///
/// Temporal `formats` default to the widget's standard pattern. A
/// `timezone` makes the datetime widget aware, with `DateTime<FixedOffset>`
/// natives; naive datetimes handed to it for rendering are read as wall
/// time in that zone. Relational widgets need a lookup handle at build time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetSpec {
    Boolean,
    Integer,
    Float,
    Decimal,
    Char,
    Date {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        formats: Vec<String>,
    },
    Time {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        formats: Vec<String>,
    },
    #[serde(rename = "datetime")]
    DateTime {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        formats: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timezone: Option<String>,
    },
    Duration,
    Array {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<String>,
    },
    Json,
    ForeignKey {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
    },
    ManyToMany {
        kind: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        field: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        separator: Option<String>,
    },
}

impl WidgetSpec {
    /// Parse a spec from JSON text.
    pub fn from_json(text: &str) -> Result<WidgetSpec, Error> {
        serde_json::from_str(text).map_err(|e| Error::config(e.to_string()))
    }

    /// The `"type"` tag of this spec.
    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetSpec::Boolean => "boolean",
            WidgetSpec::Integer => "integer",
            WidgetSpec::Float => "float",
            WidgetSpec::Decimal => "decimal",
            WidgetSpec::Char => "char",
            WidgetSpec::Date { .. } => "date",
            WidgetSpec::Time { .. } => "time",
            WidgetSpec::DateTime { .. } => "datetime",
            WidgetSpec::Duration => "duration",
            WidgetSpec::Array { .. } => "array",
            WidgetSpec::Json => "json",
            WidgetSpec::ForeignKey { .. } => "foreign_key",
            WidgetSpec::ManyToMany { .. } => "many_to_many",
        }
    }

    /// Build the described widget.
    ///
    /// `lookup` is required for `foreign_key` and `many_to_many` and ignored
    /// otherwise. Invalid format patterns, malformed timezones and a missing
    /// lookup are `Config` errors.
    pub fn build(
        &self,
        lookup: Option<Arc<dyn RecordLookup>>,
    ) -> Result<Box<dyn ErasedWidget>, Error> {
        debug!(widget = self.type_name(), "building widget");
        let widget: Box<dyn ErasedWidget> = match self {
            WidgetSpec::Boolean => Box::new(BooleanWidget::new()),
            WidgetSpec::Integer => Box::new(IntegerWidget::new()),
            WidgetSpec::Float => Box::new(FloatWidget::new()),
            WidgetSpec::Decimal => Box::new(DecimalWidget::new()),
            WidgetSpec::Char => Box::new(CharWidget::new()),
            WidgetSpec::Date { formats } => Box::new(DateWidget::from_format(temporal_format(
                formats,
                "%Y-%m-%d",
            )?)),
            WidgetSpec::Time { formats } => Box::new(TimeWidget::from_format(temporal_format(
                formats,
                "%H:%M:%S",
            )?)),
            WidgetSpec::DateTime { formats, timezone } => {
                let naive =
                    DateTimeWidget::from_format(temporal_format(formats, "%Y-%m-%d %H:%M:%S")?);
                match timezone {
                    Some(tz) => {
                        let aware = naive.with_timezone(parse_offset(tz)?);
                        Box::new(LocalizingDateTime(aware))
                    }
                    None => Box::new(naive),
                }
            }
            WidgetSpec::Duration => Box::new(DurationWidget::new()),
            WidgetSpec::Array { separator } => Box::new(match separator {
                Some(sep) => SimpleArrayWidget::with_separator(sep.clone()),
                None => SimpleArrayWidget::new(),
            }),
            WidgetSpec::Json => Box::new(JsonWidget::new()),
            WidgetSpec::ForeignKey {
                kind,
                identity,
                field,
            } => {
                let lookup = require_lookup(self, lookup)?;
                let mut widget = ForeignKeyWidget::new(record_kind(kind, identity), lookup);
                if let Some(field) = field {
                    widget = widget.with_field(field.clone());
                }
                Box::new(widget)
            }
            WidgetSpec::ManyToMany {
                kind,
                identity,
                field,
                separator,
            } => {
                let lookup = require_lookup(self, lookup)?;
                let mut widget = ManyToManyWidget::new(record_kind(kind, identity), lookup);
                if let Some(field) = field {
                    widget = widget.with_field(field.clone());
                }
                if let Some(sep) = separator {
                    widget = widget.with_separator(sep.clone());
                }
                Box::new(widget)
            }
        };
        Ok(widget)
    }
}

fn temporal_format(formats: &[String], default: &str) -> Result<TemporalFormat, Error> {
    let format = TemporalFormat::with_patterns(formats.iter().cloned(), default);
    format.validate()?;
    Ok(format)
}

fn record_kind(kind: &str, identity: &Option<String>) -> RecordKind {
    let base = RecordKind::new(kind);
    match identity {
        Some(identity) => base.with_identity(identity.clone()),
        None => base,
    }
}

fn require_lookup(
    spec: &WidgetSpec,
    lookup: Option<Arc<dyn RecordLookup>>,
) -> Result<Arc<dyn RecordLookup>, Error> {
    lookup.ok_or_else(|| {
        Error::config(format!(
            "{} widget requires a record lookup",
            spec.type_name()
        ))
    })
}

/// Parse `Z`, `UTC`, `+HH:MM`, `-HH:MM` or `+HHMM` into a fixed offset.
fn parse_offset(text: &str) -> Result<FixedOffset, Error> {
    let invalid = || Error::config(format!("invalid timezone offset {:?}", text));
    let text = text.trim();
    if text == "Z" || text.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(invalid);
    }

    let (sign, rest) = match text.as_bytes().first() {
        Some(b'+') => (1, &text[1..]),
        Some(b'-') => (-1, &text[1..]),
        _ => return Err(invalid()),
    };
    let digits: String = match rest.len() {
        5 if rest.as_bytes()[2] == b':' => format!("{}{}", &rest[..2], &rest[3..]),
        4 => rest.to_string(),
        _ => return Err(invalid()),
    };
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
    let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
    if minutes >= 60 {
        return Err(invalid());
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
