//! Core rowcast: the conversion contract
//!
//! This layer defines the vocabulary every widget speaks:
//! - `Value`: the external, flat representation of a single field
//! - `Decimal`: exact base-10 numbers
//! - `Record` / `RecordKind`: records returned by a lookup, read by field name
//! - `Row`: the sibling values of the row being converted
//! - `RecordLookup` / `Query` / `LookupKey`: the lookup capability consumed by
//!   relational widgets
//! - `Widget`: the `clean` / `render` contract
//!
//! Concrete widgets live in `rowcast-widgets`.
//!
//! # Example
//!
//! ```rust
//! use rowcast_core_widget::{Error, Row, Value, Widget};
//!
//! struct Upper;
//!
//! impl Widget for Upper {
//!     type Native = String;
//!
//!     fn clean(&self, value: &Value, _row: Option<&Row>) -> Result<Option<String>, Error> {
//!         Ok(value.as_text().map(|s| s.to_uppercase()))
//!     }
//!
//!     fn render(&self, value: Option<&String>) -> Result<Value, Error> {
//!         Ok(value.map(|s| Value::from(s.as_str())).unwrap_or_else(Value::blank))
//!     }
//! }
//!
//! assert_eq!(Upper.clean(&Value::from("abc"), None).unwrap(), Some("ABC".to_string()));
//! ```

mod decimal;
mod error;
mod lookup;
mod record;
mod value;
mod widget;

pub use decimal::Decimal;
pub use error::Error;
pub use lookup::{Filter, LookupKey, Query, RecordLookup};
pub use record::{Record, RecordKind, Row};
pub use value::Value;
pub use widget::Widget;

// Re-export chrono so downstream crates agree on the temporal types in `Value`.
pub use chrono;
