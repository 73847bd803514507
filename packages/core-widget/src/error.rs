//! Error types for widget conversions.

use crate::Value;

/// Errors raised by `clean`, `render` and record lookups.
///
/// Every error surfaces to the caller. Widgets never swallow a failure and
/// substitute a default; the only non-error outcomes for missing data are the
/// documented "no value" results (`None` or an empty sequence).
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// External text does not match the grammar the widget expects.
    #[error("cannot parse {input:?} as {expected}")]
    Parse { expected: String, input: String },

    /// A relational key resolved to no record.
    #[error("no {kind} record with {field} = {key:?}")]
    LookupNotFound {
        kind: String,
        field: String,
        key: String,
    },

    /// A relational key resolved to more than one record.
    #[error("{count} {kind} records match {field} = {key:?}")]
    LookupAmbiguous {
        kind: String,
        field: String,
        key: String,
        count: usize,
    },

    /// `render` was given something the widget cannot represent.
    #[error("{widget} cannot render {message}")]
    InvalidRenderInput {
        widget: &'static str,
        message: String,
    },

    /// An input kind the widget does not accept at all.
    #[error("unsupported value: expected {expected}, found {found}")]
    UnsupportedValue { expected: String, found: String },

    /// Widget configuration could not be turned into a widget.
    #[error("invalid widget configuration: {message}")]
    Config { message: String },

    /// Failure reported by a `RecordLookup` backend.
    #[error("lookup backend error: {0}")]
    Lookup(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// Create a parse error for `input` that should have been `expected`.
    pub fn parse(expected: impl Into<String>, input: impl Into<String>) -> Self {
        Error::Parse {
            expected: expected.into(),
            input: input.into(),
        }
    }

    /// Create an unsupported-value error naming the offending value's kind.
    pub fn unsupported(expected: impl Into<String>, found: &Value) -> Self {
        Error::UnsupportedValue {
            expected: expected.into(),
            found: found.kind_name().to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
        }
    }

    /// Wrap an arbitrary backend error.
    pub fn lookup(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Lookup(Box::new(e))
    }

    /// Whether this error comes from resolving a relational key.
    pub fn is_lookup_failure(&self) -> bool {
        matches!(
            self,
            Error::LookupNotFound { .. } | Error::LookupAmbiguous { .. } | Error::Lookup(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn parse_display() {
        let e = Error::parse("date (%d.%m.%Y)", "asdf");
        let display = format!("{}", e);
        assert!(display.contains("\"asdf\""));
        assert!(display.contains("%d.%m.%Y"));
    }

    #[test]
    fn not_found_display() {
        let e = Error::LookupNotFound {
            kind: "author".to_string(),
            field: "id".to_string(),
            key: "7".to_string(),
        };
        assert_eq!(format!("{}", e), "no author record with id = \"7\"");
        assert!(e.is_lookup_failure());
    }

    #[test]
    fn ambiguous_display() {
        let e = Error::LookupAmbiguous {
            kind: "author".to_string(),
            field: "name".to_string(),
            key: "Foo".to_string(),
            count: 2,
        };
        assert!(format!("{}", e).starts_with("2 author records"));
    }

    #[test]
    fn unsupported_names_kind() {
        let e = Error::unsupported("lookup key", &Value::Array(vec![]));
        assert!(format!("{}", e).contains("array"));
        assert!(!e.is_lookup_failure());
    }

    #[test]
    fn lookup_error_source() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "connection reset");
        let e = Error::lookup(io);
        assert!(StdError::source(&e).is_some());
        assert!(format!("{}", e).contains("connection reset"));
    }

    #[test]
    fn other_sources_are_none() {
        assert!(StdError::source(&Error::config("bad")).is_none());
    }
}
