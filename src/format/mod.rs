pub mod locale;
pub mod normalizer;
pub mod token;

use serde::{Deserialize, Deserializer};

pub use locale::Locale;
pub use normalizer::Normalizer;

pub mod fmt {
    pub const YEAR: &str = "YYYY";
    pub const MONTH: &str = "MM";
    pub const DAY: &str = "DD";
    pub const HOUR: &str = "h";
    pub const MINUTE: &str = "mm";
    pub const SECOND: &str = "ss";
    pub const AM_PM: &str = "A";

    pub const DATE_MDY: &str = "MM/DD/YYYY";
    pub const DATE_DMY: &str = "DD/MM/YYYY";
    pub const DATE_YMD: &str = "YYYY-MM-DD";
    pub const TIME_12H: &str = "h:mm A";
    pub const TIME_HM: &str = "HH:mm";
    pub const TIME_HMS: &str = "HH:mm:ss";
}

pub const DEFAULT_DATE_FORMAT: &str = fmt::DATE_MDY;
pub const DEFAULT_TIME_FORMAT: &str = fmt::TIME_12H;

/// Format configuration for one axis (date or time).
///
/// Deserializes from `true` (built-in default), `false` (suppressed) or a
/// format string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AxisFormat {
    #[default]
    Default,
    Suppressed,
    Pattern(String),
}

impl AxisFormat {
    /// Concrete format for this axis, `None` when suppressed. An empty
    /// pattern counts as suppressed.
    pub fn resolve<'a>(&'a self, default: &'static str) -> Option<&'a str> {
        match self {
            Self::Default => Some(default),
            Self::Suppressed => None,
            Self::Pattern(pattern) if pattern.is_empty() => None,
            Self::Pattern(pattern) => Some(pattern.as_str()),
        }
    }
}

impl From<bool> for AxisFormat {
    fn from(value: bool) -> Self {
        if value { Self::Default } else { Self::Suppressed }
    }
}

impl From<&str> for AxisFormat {
    fn from(value: &str) -> Self {
        Self::Pattern(value.to_string())
    }
}

impl From<String> for AxisFormat {
    fn from(value: String) -> Self {
        Self::Pattern(value)
    }
}

impl<'de> Deserialize<'de> for AxisFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Flag(bool),
            Pattern(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Flag(flag) => Self::from(flag),
            Raw::Pattern(pattern) => Self::Pattern(pattern),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSpec {
    pub date: AxisFormat,
    pub time: AxisFormat,
}

impl FormatSpec {
    pub fn new(date: impl Into<AxisFormat>, time: impl Into<AxisFormat>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    pub fn date_format(&self) -> Option<&str> {
        self.date.resolve(DEFAULT_DATE_FORMAT)
    }

    pub fn time_format(&self) -> Option<&str> {
        self.time.resolve(DEFAULT_TIME_FORMAT)
    }

    /// Non-suppressed axes joined by a single space; empty when both are
    /// suppressed.
    pub fn full_format(&self) -> String {
        match (self.date_format(), self.time_format()) {
            (Some(date), Some(time)) => format!("{date} {time}"),
            (Some(date), None) => date.to_string(),
            (None, Some(time)) => time.to_string(),
            (None, None) => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AxisFormat, FormatSpec};

    #[test]
    fn full_format_joins_axes() {
        assert_eq!(FormatSpec::default().full_format(), "MM/DD/YYYY h:mm A");
        assert_eq!(FormatSpec::new("YYYY-MM", false).full_format(), "YYYY-MM");
        assert_eq!(FormatSpec::new(false, "HH:mm").full_format(), "HH:mm");
        assert_eq!(FormatSpec::new(false, false).full_format(), "");
    }

    #[test]
    fn empty_pattern_is_suppressed() {
        let formats = FormatSpec::new("", "HH:mm");
        assert_eq!(formats.date_format(), None);
        assert_eq!(formats.full_format(), "HH:mm");
    }

    #[test]
    fn axis_format_deserializes_flags_and_patterns() {
        let parsed: Vec<AxisFormat> =
            serde_json::from_str(r#"[true, false, "DD.MM.YYYY"]"#).expect("axis formats");
        assert_eq!(
            parsed,
            vec![
                AxisFormat::Default,
                AxisFormat::Suppressed,
                AxisFormat::Pattern("DD.MM.YYYY".to_string()),
            ]
        );
    }
}
