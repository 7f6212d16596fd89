use crate::core::calendar::CalendarValue;

/// External representation of a picker value, as seen by the host.
///
/// `Text` carries in-progress input that did not parse, `Number` carries epoch
/// milliseconds and `DateTime` carries a calendar value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Text(String),
    Number(i64),
    DateTime(CalendarValue),
}

impl Value {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Text(v) => v.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<CalendarValue> {
        match self {
            Self::DateTime(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<CalendarValue> for Value {
    fn from(value: CalendarValue) -> Self {
        Self::DateTime(value)
    }
}

impl From<Option<CalendarValue>> for Value {
    fn from(value: Option<CalendarValue>) -> Self {
        value.map(Self::DateTime).unwrap_or(Self::None)
    }
}
