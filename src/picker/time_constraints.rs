use crate::core::calendar::{self, CalendarValue, Unit};
use indexmap::IndexMap;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [
        TimeUnit::Hours,
        TimeUnit::Minutes,
        TimeUnit::Seconds,
        TimeUnit::Milliseconds,
    ];

    pub fn calendar_unit(self) -> Unit {
        match self {
            Self::Hours => Unit::Hour,
            Self::Minutes => Unit::Minute,
            Self::Seconds => Unit::Second,
            Self::Milliseconds => Unit::Millisecond,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct TimeConstraint {
    #[serde(default = "default_step")]
    pub step: u32,
}

fn default_step() -> u32 {
    1
}

/// Step size per time unit for the time view steppers. Units without an
/// entry (or with a zero step) move by one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct TimeConstraints(IndexMap<TimeUnit, TimeConstraint>);

impl TimeConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step(mut self, unit: TimeUnit, step: u32) -> Self {
        self.0.insert(unit, TimeConstraint { step });
        self
    }

    pub fn step(&self, unit: TimeUnit) -> u32 {
        self.0
            .get(&unit)
            .map(|constraint| constraint.step)
            .filter(|step| *step > 0)
            .unwrap_or(1)
    }

    /// Moves `value` one step of `unit`, carrying into larger units.
    pub fn apply(&self, direction: StepDirection, unit: TimeUnit, value: CalendarValue) -> CalendarValue {
        let step = i64::from(self.step(unit));
        let amount = match direction {
            StepDirection::Up => step,
            StepDirection::Down => -step,
        };
        calendar::add_unit(value, amount, unit.calendar_unit())
    }
}
