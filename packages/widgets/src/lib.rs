//! Concrete widgets for rowcast.
//!
//! Every widget implements [`Widget`]: `clean` turns an external [`Value`]
//! into a native attribute, `render` turns it back.
//!
//! | widget | native type |
//! |---|---|
//! | [`BooleanWidget`] | `bool` |
//! | [`IntegerWidget`] | `i64` |
//! | [`FloatWidget`] | `f64` |
//! | [`DecimalWidget`] | [`Decimal`] |
//! | [`CharWidget`] | `String` |
//! | [`DateWidget`] | `NaiveDate` |
//! | [`TimeWidget`] | `NaiveTime` |
//! | [`DateTimeWidget`] | `NaiveDateTime` |
//! | [`AwareDateTimeWidget`] | `DateTime<Tz>` |
//! | [`DurationWidget`] | `TimeDelta` |
//! | [`SimpleArrayWidget`] | `Vec<String>` |
//! | [`ForeignKeyWidget`] | [`Record`] |
//! | [`ManyToManyWidget`] | `Vec<Record>` |
//!
//! # Example
//!
//! ```rust
//! use rowcast_widgets::{DateWidget, Value, Widget};
//! use chrono::NaiveDate;
//!
//! let widget = DateWidget::new("%d.%m.%Y");
//! let date = widget.clean(&Value::from("13.08.2012"), None).unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2012, 8, 13));
//! assert_eq!(widget.render(date.as_ref()).unwrap(), Value::from("13.08.2012"));
//! ```

mod collection;
mod duration;
mod foreign_key;
mod many_to_many;
mod relational;
mod scalar;
mod temporal;

pub use collection::SimpleArrayWidget;
pub use duration::DurationWidget;
pub use foreign_key::ForeignKeyWidget;
pub use many_to_many::ManyToManyWidget;
pub use relational::{AllRecords, QueryStrategy};
pub use scalar::{BooleanWidget, CharWidget, DecimalWidget, FloatWidget, IntegerWidget};
pub use temporal::{
    AwareDateTimeWidget, DateTimeWidget, DateWidget, Temporal, TemporalFormat, TemporalWidget,
    TimeWidget,
};

// Re-export core types for convenience
pub use rowcast_core_widget::{
    Decimal, Error, Filter, LookupKey, Query, Record, RecordKind, RecordLookup, Row, Value,
    Widget,
};
