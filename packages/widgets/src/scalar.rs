//! Boolean, numeric and text widgets.

use rowcast_core_widget::{Decimal, Error, Row, Value, Widget};

/// Strict booleans from the usual tabular spellings.
///
/// | input | result |
/// |---|---|
/// | `"1"`, `1`, `1.0`, `true`, `"true"`, `"True"`, `"TRUE"` | `Some(true)` |
/// | `"0"`, `0`, `0.0`, `false`, `"false"`, `"False"`, `"FALSE"` | `Some(false)` |
/// | null, `""`, `"null"`, `"NULL"`, `"none"`, `"None"`, `"NONE"` | `None` |
///
/// Absence is kept distinct from `false`. Anything else is a parse error.
#[derive(Clone, Copy, Debug, Default)]
pub struct BooleanWidget;

impl BooleanWidget {
    const TRUE_TEXT: [&'static str; 4] = ["1", "true", "True", "TRUE"];
    const FALSE_TEXT: [&'static str; 4] = ["0", "false", "False", "FALSE"];
    const NULL_TEXT: [&'static str; 6] = ["", "null", "NULL", "none", "None", "NONE"];

    pub fn new() -> Self {
        BooleanWidget
    }
}

fn one_of(set: &[&str], text: &str) -> bool {
    set.iter().any(|t| *t == text)
}

impl Widget for BooleanWidget {
    type Native = bool;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<bool>, Error> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(b) => Ok(Some(*b)),
            Value::Integer(1) => Ok(Some(true)),
            Value::Integer(0) => Ok(Some(false)),
            Value::Float(f) if *f == 1.0 => Ok(Some(true)),
            Value::Float(f) if *f == 0.0 => Ok(Some(false)),
            Value::String(s) => {
                let text = s.trim();
                if one_of(&Self::TRUE_TEXT, text) {
                    Ok(Some(true))
                } else if one_of(&Self::FALSE_TEXT, text) {
                    Ok(Some(false))
                } else if one_of(&Self::NULL_TEXT, text) {
                    Ok(None)
                } else {
                    Err(Error::parse("boolean", s.as_str()))
                }
            }
            Value::Integer(i) => Err(Error::parse("boolean", i.to_string())),
            Value::Float(f) => Err(Error::parse("boolean", f.to_string())),
            other => Err(Error::unsupported("boolean", other)),
        }
    }

    fn render(&self, value: Option<&bool>) -> Result<Value, Error> {
        Ok(match value {
            None => Value::blank(),
            Some(true) => Value::from("1"),
            Some(false) => Value::from("0"),
        })
    }
}

/// Whole numbers.
///
/// Accepts integers, floats and numeric text. Fractions are truncated
/// toward zero, so `"0.0"` cleans to `0` and `"-3.9"` to `-3`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntegerWidget;

impl IntegerWidget {
    pub fn new() -> Self {
        IntegerWidget
    }
}

fn float_to_i64(f: f64) -> Result<i64, Error> {
    // i64::MIN is exactly representable; i64::MAX rounds up to 2^63.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    let t = f.trunc();
    if t.is_finite() && t >= -LIMIT && t < LIMIT {
        Ok(t as i64)
    } else {
        Err(Error::parse("integer", f.to_string()))
    }
}

fn decimal_to_i64(d: &Decimal, input: &str) -> Result<i64, Error> {
    i64::try_from(d.trunc()).map_err(|_| Error::parse("integer", input))
}

impl Widget for IntegerWidget {
    type Native = i64;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<i64>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::Integer(i) => Ok(Some(*i)),
            Value::Float(f) => float_to_i64(*f).map(Some),
            Value::Decimal(d) => decimal_to_i64(d, &d.to_string()).map(Some),
            Value::String(s) => {
                let text = s.trim();
                if let Ok(i) = text.parse::<i64>() {
                    return Ok(Some(i));
                }
                let d: Decimal = text.parse().map_err(|_| Error::parse("integer", s.as_str()))?;
                decimal_to_i64(&d, s).map(Some)
            }
            other => Err(Error::unsupported("integer", other)),
        }
    }

    fn render(&self, value: Option<&i64>) -> Result<Value, Error> {
        Ok(value.map(|i| Value::Integer(*i)).unwrap_or_else(Value::blank))
    }
}

/// IEEE double precision numbers, never rounded.
#[derive(Clone, Copy, Debug, Default)]
pub struct FloatWidget;

impl FloatWidget {
    pub fn new() -> Self {
        FloatWidget
    }
}

impl Widget for FloatWidget {
    type Native = f64;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<f64>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::Float(f) => Ok(Some(*f)),
            Value::Integer(i) => Ok(Some(*i as f64)),
            Value::Decimal(d) => Ok(Some(d.to_f64())),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| Error::parse("float", s.as_str())),
            other => Err(Error::unsupported("float", other)),
        }
    }

    fn render(&self, value: Option<&f64>) -> Result<Value, Error> {
        Ok(value.map(|f| Value::Float(*f)).unwrap_or_else(Value::blank))
    }
}

/// Exact decimals.
///
/// `render` hands back the native [`Decimal`] as `Value::Decimal` rather
/// than text; textualizing it is up to the caller.
#[derive(Clone, Copy, Debug, Default)]
pub struct DecimalWidget;

impl DecimalWidget {
    pub fn new() -> Self {
        DecimalWidget
    }
}

impl Widget for DecimalWidget {
    type Native = Decimal;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<Decimal>, Error> {
        if value.is_empty() {
            return Ok(None);
        }
        match value {
            Value::Decimal(d) => Ok(Some(*d)),
            Value::Integer(i) => Ok(Some(Decimal::from(*i))),
            Value::Float(f) => Decimal::from_f64(*f).map(Some),
            Value::String(s) => s.parse().map(Some),
            other => Err(Error::unsupported("decimal", other)),
        }
    }

    fn render(&self, value: Option<&Decimal>) -> Result<Value, Error> {
        Ok(value.map(|d| Value::Decimal(*d)).unwrap_or_else(Value::blank))
    }
}

/// Opaque text.
///
/// The escape hatch for unstructured fields: it does not treat blank text
/// as absent, and renders a missing value as the literal text `"None"`.
#[derive(Clone, Copy, Debug, Default)]
pub struct CharWidget;

impl CharWidget {
    pub fn new() -> Self {
        CharWidget
    }
}

impl Widget for CharWidget {
    type Native = String;

    fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<String>, Error> {
        Ok(value.as_text().map(|t| t.into_owned()))
    }

    fn render(&self, value: Option<&String>) -> Result<Value, Error> {
        Ok(Value::String(match value {
            Some(s) => s.clone(),
            None => "None".to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean<W: Widget>(widget: &W, value: impl Into<Value>) -> Option<W::Native> {
        widget.clean(&value.into(), None).unwrap()
    }

    #[test]
    fn boolean_clean() {
        let widget = BooleanWidget;
        assert_eq!(clean(&widget, "1"), Some(true));
        assert_eq!(clean(&widget, 1i64), Some(true));
        assert_eq!(clean(&widget, "TRUE"), Some(true));
        assert_eq!(clean(&widget, "0"), Some(false));
        assert_eq!(clean(&widget, false), Some(false));
        assert_eq!(clean(&widget, ""), None);
        assert_eq!(clean(&widget, "None"), None);
        assert_eq!(clean(&widget, Value::Null), None);
    }

    #[test]
    fn boolean_rejects_unknown() {
        let widget = BooleanWidget;
        assert!(matches!(
            widget.clean(&Value::from("maybe"), None),
            Err(Error::Parse { .. })
        ));
        assert!(widget.clean(&Value::Integer(2), None).is_err());
        assert!(widget.clean(&Value::Float(0.5), None).is_err());
    }

    #[test]
    fn boolean_integral_floats() {
        let widget = BooleanWidget;
        assert_eq!(clean(&widget, 1.0), Some(true));
        assert_eq!(clean(&widget, 0.0), Some(false));
        assert_eq!(clean(&widget, -0.0), Some(false));
        assert!(matches!(
            widget.clean(&Value::Float(2.0), None),
            Err(Error::Parse { .. })
        ));
        assert!(widget.clean(&Value::Float(f64::NAN), None).is_err());
    }

    #[test]
    fn boolean_render() {
        let widget = BooleanWidget;
        assert_eq!(widget.render(None).unwrap(), Value::blank());
        assert_eq!(widget.render(Some(&true)).unwrap(), Value::from("1"));
        assert_eq!(widget.render(Some(&false)).unwrap(), Value::from("0"));

        let rendered = widget.render(Some(&true)).unwrap();
        assert_eq!(widget.clean(&rendered, None).unwrap(), Some(true));
    }

    #[test]
    fn integer_zero_forms() {
        let widget = IntegerWidget;
        assert_eq!(clean(&widget, 0i64), Some(0));
        assert_eq!(clean(&widget, "0"), Some(0));
        assert_eq!(clean(&widget, "0.0"), Some(0));
        assert_eq!(clean(&widget, 0.0), Some(0));
    }

    #[test]
    fn integer_truncates() {
        let widget = IntegerWidget;
        assert_eq!(clean(&widget, "-3.9"), Some(-3));
        assert_eq!(clean(&widget, 7.99), Some(7));
        assert_eq!(clean(&widget, " 42 "), Some(42));
        assert_eq!(clean(&widget, "1e3"), Some(1000));
    }

    #[test]
    fn integer_rejects() {
        let widget = IntegerWidget;
        assert!(widget.clean(&Value::from("abc"), None).is_err());
        assert!(widget
            .clean(&Value::from("99999999999999999999"), None)
            .is_err());
        assert!(widget.clean(&Value::Float(f64::NAN), None).is_err());
        assert!(widget.clean(&Value::Float(1e19), None).is_err());
        assert!(widget.clean(&Value::Bool(true), None).is_err());
    }

    #[test]
    fn extreme_exponents_fail_fast() {
        assert_eq!(clean(&IntegerWidget, "0e9223372036854775807"), Some(0));
        assert_eq!(clean(&DecimalWidget, "0e-9223372036854775808"), Some(Decimal::ZERO));
        assert!(IntegerWidget
            .clean(&Value::from("1e9223372036854775807"), None)
            .is_err());
        assert!(DecimalWidget
            .clean(&Value::from("1e-9223372036854775808"), None)
            .is_err());
    }

    #[test]
    fn integer_empty_and_render() {
        let widget = IntegerWidget;
        assert_eq!(clean(&widget, ""), None);
        assert_eq!(clean(&widget, Value::Null), None);
        assert_eq!(widget.render(None).unwrap(), Value::blank());
        assert_eq!(widget.render(Some(&5)).unwrap(), Value::Integer(5));
    }

    #[test]
    fn float_clean() {
        let widget = FloatWidget;
        assert_eq!(clean(&widget, Value::Null), None);
        assert_eq!(clean(&widget, 1.0 / 3.0), Some(0.3333333333333333));
        assert_eq!(clean(&widget, "0.0"), Some(0.0));
        assert_eq!(clean(&widget, 0i64), Some(0.0));
        assert!(widget.clean(&Value::from("x1"), None).is_err());
    }

    #[test]
    fn float_render() {
        let widget = FloatWidget;
        assert_eq!(widget.render(None).unwrap(), Value::blank());
        assert_eq!(widget.render(Some(&2.5)).unwrap(), Value::Float(2.5));
    }

    #[test]
    fn decimal_keeps_digits() {
        let widget = DecimalWidget;
        let value: Decimal = "11.111".parse().unwrap();
        assert_eq!(clean(&widget, "11.111"), Some(value));
        assert_eq!(
            widget.render(Some(&value)).unwrap(),
            Value::Decimal(value)
        );
    }

    #[test]
    fn decimal_zero_forms() {
        let widget = DecimalWidget;
        assert_eq!(clean(&widget, "0"), Some(Decimal::ZERO));
        assert_eq!(clean(&widget, "0.0"), Some(Decimal::ZERO));
        assert_eq!(clean(&widget, 0i64), Some(Decimal::ZERO));
        assert_eq!(clean(&widget, ""), None);
        assert_eq!(widget.render(None).unwrap(), Value::blank());
    }

    #[test]
    fn decimal_round_trip() {
        let widget = DecimalWidget;
        let cleaned = clean(&widget, "11.111");
        let rendered = widget.render(cleaned.as_ref()).unwrap();
        assert_eq!(widget.clean(&rendered, None).unwrap(), cleaned);
    }

    #[test]
    fn char_render() {
        let widget = CharWidget;
        assert_eq!(widget.render(None).unwrap(), Value::from("None"));
        assert_eq!(
            widget.render(Some(&"asdf".to_string())).unwrap(),
            Value::from("asdf")
        );
    }

    #[test]
    fn char_clean_any_scalar() {
        let widget = CharWidget;
        assert_eq!(clean(&widget, "asdf"), Some("asdf".to_string()));
        assert_eq!(clean(&widget, ""), Some(String::new()));
        assert_eq!(clean(&widget, 12i64), Some("12".to_string()));
        assert_eq!(clean(&widget, Value::Null), None);
    }
}
