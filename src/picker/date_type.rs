use crate::core::value::Value;
use std::str::FromStr;

/// External representation produced for calendar values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateTypeMode {
    /// Calendar value as-is (`Value::DateTime`).
    #[default]
    Date,
    /// Epoch milliseconds (`Value::Number`).
    UtcMsTimestamp,
    /// Text rendered with the full format (`Value::Text`).
    InputFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date type mode `{0}` (expected Date, utc-ms-timestamp or input-format)")]
pub struct ParseDateTypeModeError(pub String);

impl DateTypeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::UtcMsTimestamp => "utc-ms-timestamp",
            Self::InputFormat => "input-format",
        }
    }

    /// An explicit mode wins; otherwise a numeric value infers timestamps.
    pub fn resolve(explicit: Option<Self>, value: &Value) -> Self {
        match (explicit, value) {
            (Some(mode), _) => mode,
            (None, Value::Number(_)) => Self::UtcMsTimestamp,
            (None, _) => Self::Date,
        }
    }
}

impl FromStr for DateTypeMode {
    type Err = ParseDateTypeModeError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "utc-ms-timestamp" => Ok(Self::UtcMsTimestamp),
            "input-format" => Ok(Self::InputFormat),
            _ => Err(ParseDateTypeModeError(raw.to_string())),
        }
    }
}
