//! Date, time and datetime widgets.
//!
//! All of them share [`TemporalFormat`]: one or more strftime-style
//! patterns. The first pattern renders; `clean` tries each in order. Parsing
//! is pattern-driven, so dates before 1900 (or any other epoch) need no
//! special casing.
//!
//! Timezone handling is explicit. [`DateTimeWidget`] works on naive
//! datetimes; [`DateTimeWidget::with_timezone`] turns it into an
//! [`AwareDateTimeWidget`] that localizes parsed values into a given zone and
//! renders wall time in that zone.

use std::fmt::{self, Write as _};
use std::marker::PhantomData;

use chrono::format::{DelayedFormat, Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use rowcast_core_widget::{Error, Row, Value, Widget};

/// The format patterns of a temporal widget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TemporalFormat {
    patterns: Vec<String>,
}

impl TemporalFormat {
    /// A single pattern, used both to parse and to render.
    pub fn new(pattern: impl Into<String>) -> Self {
        TemporalFormat {
            patterns: vec![pattern.into()],
        }
    }

    /// Several input patterns, tried in order. The first one renders.
    ///
    /// Falls back to `default` when `patterns` is empty.
    pub fn with_patterns<I, S>(patterns: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let patterns: Vec<String> = patterns.into_iter().map(Into::into).collect();
        if patterns.is_empty() {
            Self::new(default)
        } else {
            TemporalFormat { patterns }
        }
    }

    /// All patterns, rendering pattern first.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// The pattern used by `render`.
    pub fn render_pattern(&self) -> &str {
        // Constructors never leave `patterns` empty.
        self.patterns.first().map(String::as_str).unwrap_or_default()
    }

    /// Reject patterns containing unknown or malformed specifiers.
    pub fn validate(&self) -> Result<(), Error> {
        for pattern in &self.patterns {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(Error::config(format!("invalid format pattern {:?}", pattern)));
            }
        }
        Ok(())
    }

    /// Parse `text` with the first pattern that accepts it.
    fn parse<T>(
        &self,
        text: &str,
        what: &str,
        parse: impl Fn(&str, &str) -> chrono::ParseResult<T>,
    ) -> Result<T, Error> {
        let text = text.trim();
        self.patterns
            .iter()
            .find_map(|pattern| parse(text, pattern).ok())
            .ok_or_else(|| {
                Error::parse(format!("{} ({})", what, self.patterns.join(" | ")), text)
            })
    }

    /// Write `item` to text, mapping formatter failures to render errors.
    fn render(&self, widget: &'static str, item: impl fmt::Display) -> Result<Value, Error> {
        let mut out = String::new();
        write!(out, "{}", item).map_err(|_| Error::InvalidRenderInput {
            widget,
            message: format!("with format pattern {:?}", self.render_pattern()),
        })?;
        Ok(Value::String(out))
    }
}

/// A native temporal type a [`TemporalWidget`] converts.
pub trait Temporal: Sized + Clone + Send + Sync {
    /// Human-readable name, used in errors.
    const NAME: &'static str;

    /// Pattern used when none is configured.
    const DEFAULT_PATTERN: &'static str;

    fn parse_with(text: &str, pattern: &str) -> chrono::ParseResult<Self>;

    fn format_with<'a>(&self, pattern: &'a str) -> DelayedFormat<StrftimeItems<'a>>;

    /// Accept a `Value` that already carries a native temporal value.
    fn from_native(value: &Value) -> Option<Self>;
}

impl Temporal for NaiveDate {
    const NAME: &'static str = "date";
    const DEFAULT_PATTERN: &'static str = "%Y-%m-%d";

    fn parse_with(text: &str, pattern: &str) -> chrono::ParseResult<Self> {
        NaiveDate::parse_from_str(text, pattern)
    }

    fn format_with<'a>(&self, pattern: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.format(pattern)
    }

    fn from_native(value: &Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(*d),
            Value::DateTime(dt) => Some(dt.date()),
            Value::DateTimeTz(dt) => Some(dt.date_naive()),
            _ => None,
        }
    }
}

impl Temporal for NaiveTime {
    const NAME: &'static str = "time";
    const DEFAULT_PATTERN: &'static str = "%H:%M:%S";

    fn parse_with(text: &str, pattern: &str) -> chrono::ParseResult<Self> {
        NaiveTime::parse_from_str(text, pattern)
    }

    fn format_with<'a>(&self, pattern: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.format(pattern)
    }

    fn from_native(value: &Value) -> Option<Self> {
        match value {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

impl Temporal for NaiveDateTime {
    const NAME: &'static str = "datetime";
    const DEFAULT_PATTERN: &'static str = "%Y-%m-%d %H:%M:%S";

    fn parse_with(text: &str, pattern: &str) -> chrono::ParseResult<Self> {
        NaiveDateTime::parse_from_str(text, pattern)
    }

    fn format_with<'a>(&self, pattern: &'a str) -> DelayedFormat<StrftimeItems<'a>> {
        self.format(pattern)
    }

    fn from_native(value: &Value) -> Option<Self> {
        match value {
            Value::DateTime(dt) => Some(*dt),
            Value::DateTimeTz(dt) => Some(dt.naive_local()),
            _ => None,
        }
    }
}

/// Pattern-driven widget for one naive temporal type.
pub struct TemporalWidget<T> {
    format: TemporalFormat,
    _native: PhantomData<fn() -> T>,
}

/// Calendar dates, default pattern `%Y-%m-%d`.
pub type DateWidget = TemporalWidget<NaiveDate>;

/// Times of day, default pattern `%H:%M:%S`.
pub type TimeWidget = TemporalWidget<NaiveTime>;

/// Naive datetimes, default pattern `%Y-%m-%d %H:%M:%S`.
pub type DateTimeWidget = TemporalWidget<NaiveDateTime>;

impl<T: Temporal> TemporalWidget<T> {
    /// A widget with a single pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self::from_format(TemporalFormat::new(pattern))
    }

    /// A widget accepting several input patterns; the first renders.
    pub fn with_patterns<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_format(TemporalFormat::with_patterns(patterns, T::DEFAULT_PATTERN))
    }

    pub fn from_format(format: TemporalFormat) -> Self {
        TemporalWidget {
            format,
            _native: PhantomData,
        }
    }

    pub fn format(&self) -> &TemporalFormat {
        &self.format
    }
}

impl<T: Temporal> Default for TemporalWidget<T> {
    fn default() -> Self {
        Self::new(T::DEFAULT_PATTERN)
    }
}

impl<T> Clone for TemporalWidget<T> {
    fn clone(&self) -> Self {
        TemporalWidget {
            format: self.format.clone(),
            _native: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TemporalWidget<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemporalWidget")
            .field("patterns", &self.format.patterns)
            .finish()
    }
}

impl<T: Temporal> Widget for TemporalWidget<T> {
    type Native = T;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<T>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        if let Some(native) = T::from_native(value) {
            return Ok(Some(native));
        }
        match value {
            Value::String(s) => self.format.parse(s, T::NAME, T::parse_with).map(Some),
            other => Err(Error::unsupported(T::NAME, other)),
        }
    }

    fn render(&self, value: Option<&T>) -> Result<Value, Error> {
        match value {
            None => Ok(Value::blank()),
            Some(v) => self
                .format
                .render(T::NAME, v.format_with(self.format.render_pattern())),
        }
    }
}

impl TemporalWidget<NaiveDateTime> {
    /// Make the widget timezone aware: parsed values are localized to `tz`,
    /// rendered values are shown as wall time in `tz`.
    pub fn with_timezone<Tz: TimeZone>(self, tz: Tz) -> AwareDateTimeWidget<Tz> {
        AwareDateTimeWidget {
            format: self.format,
            tz,
        }
    }
}

/// Datetimes pinned to a default timezone.
///
/// ```rust
/// use chrono::{FixedOffset, NaiveDate, TimeZone};
/// use rowcast_widgets::{DateTimeWidget, Value, Widget};
///
/// let tz = FixedOffset::east_opt(3600).unwrap();
/// let widget = DateTimeWidget::new("%d.%m.%Y %H:%M:%S").with_timezone(tz);
///
/// let naive = NaiveDate::from_ymd_opt(2012, 8, 13).unwrap().and_hms_opt(18, 0, 0).unwrap();
/// let cleaned = widget.clean(&Value::from("13.08.2012 18:00:00"), None).unwrap();
/// assert_eq!(cleaned, Some(tz.from_local_datetime(&naive).unwrap()));
/// ```
#[derive(Clone, Debug)]
pub struct AwareDateTimeWidget<Tz: TimeZone> {
    format: TemporalFormat,
    tz: Tz,
}

impl<Tz: TimeZone> AwareDateTimeWidget<Tz> {
    pub fn timezone(&self) -> &Tz {
        &self.tz
    }

    pub fn format(&self) -> &TemporalFormat {
        &self.format
    }

    /// Interpret a naive datetime as wall time in the configured zone.
    pub fn localize(&self, naive: &NaiveDateTime) -> Result<DateTime<Tz>, Error> {
        self.tz.from_local_datetime(naive).single().ok_or_else(|| {
            Error::parse(
                "unambiguous local datetime in the configured timezone",
                naive.to_string(),
            )
        })
    }
}

impl<Tz> Widget for AwareDateTimeWidget<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    type Native = DateTime<Tz>;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<DateTime<Tz>>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::DateTimeTz(dt) => Ok(Some(dt.with_timezone(&self.tz))),
            Value::DateTime(naive) => self.localize(naive).map(Some),
            Value::String(s) => {
                let naive = self.format.parse(
                    s,
                    NaiveDateTime::NAME,
                    NaiveDateTime::parse_with,
                )?;
                self.localize(&naive).map(Some)
            }
            other => Err(Error::unsupported(NaiveDateTime::NAME, other)),
        }
    }

    fn render(&self, value: Option<&DateTime<Tz>>) -> Result<Value, Error> {
        match value {
            None => Ok(Value::blank()),
            Some(dt) => {
                let local = dt.with_timezone(&self.tz).naive_local();
                self.format.render(
                    NaiveDateTime::NAME,
                    local.format(self.format.render_pattern()),
                )
            }
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any calendar date from year 1 to 9999 survives render then clean.
        #[test]
        fn prop_date_round_trip(days in 0i64..3_652_058) {
            let d = NaiveDate::from_ymd_opt(1, 1, 1).unwrap() + chrono::TimeDelta::days(days);
            let widget = DateWidget::new("%d.%m.%Y");
            let rendered = widget.render(Some(&d)).unwrap();
            prop_assert_eq!(widget.clean(&rendered, None).unwrap(), Some(d));
        }
    }
}
