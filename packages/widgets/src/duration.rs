//! Elapsed-time widget.

use chrono::TimeDelta;
use rowcast_core_widget::{Error, Row, Value, Widget};

const EXPECTED: &str = "duration ([-]H:MM:SS[.ffffff])";

/// Durations written as `[-]H:MM:SS[.ffffff]`.
///
/// Hours are unbounded (`"25:00:00"` is a day and an hour); minutes and
/// seconds must be below 60. Integers and floats are taken as seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct DurationWidget;

impl DurationWidget {
    pub fn new() -> Self {
        DurationWidget
    }
}

fn parse_unit(part: &str, max: Option<i64>) -> Option<i64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let n: i64 = part.parse().ok()?;
    match max {
        Some(max) if n >= max => None,
        _ => Some(n),
    }
}

/// Parse `[-]H:MM:SS[.fraction]`, fraction up to nanoseconds.
fn parse_duration(text: &str) -> Option<TimeDelta> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let mut parts = unsigned.split(':');
    let (hours, minutes, seconds) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || minutes.len() > 2 {
        return None;
    }

    let (whole_seconds, fraction) = match seconds.split_once('.') {
        Some((s, f)) => (s, f),
        None => (seconds, ""),
    };
    if whole_seconds.len() > 2 || fraction.len() > 9 {
        return None;
    }
    let nanos = if fraction.is_empty() {
        0
    } else {
        parse_unit(fraction, None)? * 10i64.pow(9 - fraction.len() as u32)
    };

    let total = parse_unit(hours, None)?
        .checked_mul(3600)?
        .checked_add(parse_unit(minutes, Some(60))? * 60)?
        .checked_add(parse_unit(whole_seconds, Some(60))?)?;

    let delta = TimeDelta::try_seconds(total)?.checked_add(&TimeDelta::nanoseconds(nanos))?;
    Some(if negative { -delta } else { delta })
}

fn format_duration(delta: &TimeDelta) -> String {
    let negative = *delta < TimeDelta::zero();
    let magnitude = if negative { -*delta } else { *delta };
    let total = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos();

    let mut out = format!(
        "{}{}:{:02}:{:02}",
        if negative { "-" } else { "" },
        total / 3600,
        total % 3600 / 60,
        total % 60
    );
    if nanos != 0 {
        if nanos % 1000 == 0 {
            out.push_str(&format!(".{:06}", nanos / 1000));
        } else {
            out.push_str(&format!(".{:09}", nanos));
        }
    }
    out
}

fn seconds_to_delta(seconds: f64) -> Option<TimeDelta> {
    if !seconds.is_finite() {
        return None;
    }
    let nanos = seconds * 1e9;
    if nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::nanoseconds(nanos.round() as i64))
}

impl Widget for DurationWidget {
    type Native = TimeDelta;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<TimeDelta>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::Duration(d) => Ok(Some(*d)),
            Value::Integer(i) => TimeDelta::try_seconds(*i)
                .map(Some)
                .ok_or_else(|| Error::parse(EXPECTED, i.to_string())),
            Value::Float(f) => seconds_to_delta(*f)
                .map(Some)
                .ok_or_else(|| Error::parse(EXPECTED, f.to_string())),
            Value::String(s) => parse_duration(s.trim())
                .map(Some)
                .ok_or_else(|| Error::parse(EXPECTED, s.as_str())),
            other => Err(Error::unsupported("duration", other)),
        }
    }

    fn render(&self, value: Option<&TimeDelta>) -> Result<Value, Error> {
        Ok(value
            .map(|d| Value::String(format_duration(d)))
            .unwrap_or_else(Value::blank))
    }
}
