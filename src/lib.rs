pub mod config;
pub mod core;
pub mod format;
pub mod picker;
pub mod runtime;
pub mod terminal;
pub mod ui;
pub mod views;
pub mod widgets;

pub use config::{ConfigError, PickerOptions};
pub use core::value::Value;
pub use format::{AxisFormat, FormatSpec, Locale};
pub use picker::{DateTimePicker, DateTypeMode, PickerEvent, PickerOutcome, ViewMode};
pub use widgets::date_time::DateTimeInput;
