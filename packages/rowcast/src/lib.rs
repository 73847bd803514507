//! rowcast: convert flat external values to typed record attributes and back.
//!
//! Each column of a tabular import or export gets a widget. `clean` turns the
//! cell into a native value, `render` turns the native value back into a
//! cell. Relational widgets resolve keys through a [`RecordLookup`].
//!
//! | crate | contents |
//! |---|---|
//! | [`core_widget`] | `Value`, `Decimal`, `Record`, `Query`, `RecordLookup`, `Widget`, `Error` |
//! | [`widgets`] | scalar, temporal, collection and relational widgets |
//! | [`serde_widget`] | JSON conversions, `JsonWidget`, `ErasedWidget`, `WidgetSpec` |
//! | [`memory_lookup`] | `InMemoryLookup` |

pub use rowcast_core_widget as core_widget;
pub use rowcast_memory_lookup as memory_lookup;
pub use rowcast_serde_widget as serde_widget;
pub use rowcast_widgets as widgets;

pub use rowcast_core_widget::{
    Decimal, Error, LookupKey, Query, Record, RecordKind, RecordLookup, Row, Value, Widget,
};
pub use rowcast_memory_lookup::InMemoryLookup;
pub use rowcast_serde_widget::{ErasedWidget, JsonWidget, WidgetSpec};
pub use rowcast_widgets::{
    AwareDateTimeWidget, BooleanWidget, CharWidget, DateTimeWidget, DateWidget, DecimalWidget,
    DurationWidget, FloatWidget, ForeignKeyWidget, IntegerWidget, ManyToManyWidget,
    QueryStrategy, SimpleArrayWidget, TimeWidget,
};
