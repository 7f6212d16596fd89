pub mod coordinator;
pub mod date_type;
pub mod derived;
pub mod driver;
pub mod stepper;
pub mod time_constraints;
pub mod view_mode;

pub use coordinator::ChangeCoordinator;
pub use date_type::DateTypeMode;
pub use derived::Derived;
pub use driver::{DatePredicate, DateTimePicker, PickerEvent, PickerKey, PickerOutcome};
pub use stepper::Press;
pub use time_constraints::{StepDirection, TimeConstraints, TimeUnit};
pub use view_mode::ViewMode;
