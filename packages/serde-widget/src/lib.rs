//! Serde integration for rowcast widgets.
//!
//! - [`convert`]: `Value` <-> `serde_json::Value`.
//! - [`JsonWidget`]: a widget whose native type is a JSON document.
//! - [`Native`] and [`ErasedWidget`]: run heterogeneous widgets behind one
//!   object-safe interface, with natives carried as `Value`.
//! - [`WidgetSpec`]: describe a widget in JSON and build it.
//!
//! # Example
//!
//! ```rust
//! use rowcast_serde_widget::{ErasedWidget, WidgetSpec};
//! use rowcast_core_widget::Value;
//!
//! let spec = WidgetSpec::from_json(r#"{"type": "date", "formats": ["%d.%m.%Y"]}"#).unwrap();
//! let widget = spec.build(None).unwrap();
//!
//! let date = widget.clean_value(&Value::from("13.08.2012"), None).unwrap();
//! assert!(matches!(date, Value::Date(_)));
//! assert_eq!(widget.render_value(&date).unwrap(), Value::from("13.08.2012"));
//! ```

pub mod convert;
mod erased;
mod json;
mod native;
mod spec;

pub use convert::{json_to_value, value_to_json};
pub use erased::ErasedWidget;
pub use json::JsonWidget;
pub use native::Native;
pub use spec::WidgetSpec;
