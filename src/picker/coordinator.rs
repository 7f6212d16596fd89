use super::date_type::DateTypeMode;
use crate::core::calendar::{self, CalendarValue};
use crate::core::value::Value;
use crate::format::Normalizer;

/// Turns selections into the host's value representation and decides
/// whether a change is worth reporting.
#[derive(Debug, Clone, Copy)]
pub struct ChangeCoordinator<'a> {
    mode: DateTypeMode,
    full_format: &'a str,
    normalizer: Normalizer<'a>,
}

impl<'a> ChangeCoordinator<'a> {
    pub fn new(mode: DateTypeMode, full_format: &'a str, normalizer: Normalizer<'a>) -> Self {
        Self {
            mode,
            full_format,
            normalizer,
        }
    }

    /// Text and empty values pass through untouched; calendar values are
    /// converted per the date type mode.
    pub fn compute_output_value(&self, new_value: &Value) -> Value {
        match new_value {
            Value::None | Value::Text(_) => new_value.clone(),
            Value::DateTime(value) => self.convert(*value),
            Value::Number(millis) => match calendar::from_epoch_millis(*millis) {
                Some(value) => self.convert(value),
                None => new_value.clone(),
            },
        }
    }

    /// Calendar values compare at the precision of the full format; anything
    /// else compares strictly.
    pub fn is_redundant(&self, previous: &Value, next: &Value) -> bool {
        match (previous, next) {
            (Value::DateTime(a), Value::DateTime(b)) => self.same_at_format_precision(*a, *b),
            _ => previous == next,
        }
    }

    fn convert(&self, value: CalendarValue) -> Value {
        match self.mode {
            DateTypeMode::UtcMsTimestamp => Value::Number(calendar::to_epoch_millis(value)),
            DateTypeMode::InputFormat => Value::Text(self.normalizer.format(value, self.full_format)),
            DateTypeMode::Date => Value::DateTime(value),
        }
    }

    fn same_at_format_precision(&self, a: CalendarValue, b: CalendarValue) -> bool {
        if self.full_format.is_empty() {
            return a == b;
        }
        self.normalizer.format(a, self.full_format) == self.normalizer.format(b, self.full_format)
    }
}
