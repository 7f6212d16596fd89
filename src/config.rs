use crate::core::value::Value;
use crate::format::{AxisFormat, FormatSpec, Locale};
use crate::picker::date_type::ParseDateTypeModeError;
use crate::picker::{DateTimePicker, DateTypeMode, TimeConstraints};
use crate::widgets::date_time::DateTimeInput;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const DEFAULT_ID: &str = "date";
const DEFAULT_LABEL: &str = "Date";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid YAML picker options: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid JSON picker options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unknown locale `{0}`")]
    UnknownLocale(String),
    #[error(transparent)]
    InvalidDateTypeMode(#[from] ParseDateTypeModeError),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Number(i64),
    Text(String),
}

impl From<OptionValue> for Value {
    fn from(value: OptionValue) -> Self {
        match value {
            OptionValue::Number(millis) => Value::Number(millis),
            OptionValue::Text(text) => Value::Text(text),
        }
    }
}

/// Picker configuration as it appears in YAML or JSON files.
///
/// ```yaml
/// id: due
/// label: Due date
/// value: 06/16/2015 9:30 AM
/// dateFormat: MM/DD/YYYY
/// timeFormat: true
/// dateTypeMode: utc-ms-timestamp
/// timeConstraints:
///   minutes: { step: 15 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PickerOptions {
    pub id: Option<String>,
    pub label: Option<String>,
    pub value: Option<OptionValue>,
    pub date_format: AxisFormat,
    pub time_format: AxisFormat,
    pub date_type_mode: Option<String>,
    pub locale: Option<String>,
    pub should_hide_input: bool,
    pub time_constraints: TimeConstraints,
}

impl PickerOptions {
    pub fn from_yaml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads options from disk; `.json` files are read as JSON, anything
    /// else as YAML.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&raw)
        } else {
            Self::from_yaml_str(&raw)
        }
    }

    pub fn formats(&self) -> FormatSpec {
        FormatSpec {
            date: self.date_format.clone(),
            time: self.time_format.clone(),
        }
    }

    pub fn date_type_mode(&self) -> Result<Option<DateTypeMode>, ConfigError> {
        match self.date_type_mode.as_deref() {
            None => Ok(None),
            Some(raw) => raw.parse().map(Some).map_err(|err| {
                warn!(mode = raw, "rejected date type mode");
                ConfigError::from(err)
            }),
        }
    }

    pub fn locale(&self) -> Result<Locale, ConfigError> {
        match self.locale.as_deref() {
            None => Ok(Locale::english()),
            Some(name) => Locale::by_name(name).ok_or_else(|| {
                warn!(locale = name, "rejected locale");
                ConfigError::UnknownLocale(name.to_string())
            }),
        }
    }

    pub fn build_picker(&self) -> Result<DateTimePicker, ConfigError> {
        let mut picker = DateTimePicker::new(self.formats())
            .with_locale(self.locale()?)
            .with_time_constraints(self.time_constraints.clone())
            .static_mode(self.should_hide_input);
        if let Some(mode) = self.date_type_mode()? {
            picker = picker.with_date_type_mode(mode);
        }
        if let Some(value) = self.value.clone() {
            picker = picker.with_value(Value::from(value));
        }
        Ok(picker)
    }

    pub fn build_input(&self) -> Result<DateTimeInput, ConfigError> {
        Ok(DateTimeInput::new(
            self.id.as_deref().unwrap_or(DEFAULT_ID),
            self.label.as_deref().unwrap_or(DEFAULT_LABEL),
            self.build_picker()?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, OptionValue, PickerOptions};
    use crate::core::value::Value;
    use crate::format::AxisFormat;
    use crate::picker::{DateTypeMode, TimeUnit, ViewMode};

    #[test]
    fn yaml_options_use_camel_case_keys() {
        let options = PickerOptions::from_yaml_str(
            "id: due\n\
             label: Due date\n\
             value: 06/16/2015\n\
             dateFormat: MM/DD/YYYY\n\
             timeFormat: false\n\
             dateTypeMode: Input-Format\n\
             timeConstraints:\n  minutes: { step: 15 }\n  hours: {}\n",
        )
        .expect("valid yaml");

        assert_eq!(options.id.as_deref(), Some("due"));
        assert_eq!(options.value, Some(OptionValue::Text("06/16/2015".to_string())));
        assert_eq!(options.date_format, AxisFormat::Pattern("MM/DD/YYYY".to_string()));
        assert_eq!(options.time_format, AxisFormat::Suppressed);
        assert_eq!(options.date_type_mode().expect("mode"), Some(DateTypeMode::InputFormat));
        assert_eq!(options.time_constraints.step(TimeUnit::Minutes), 15);
        assert_eq!(options.time_constraints.step(TimeUnit::Hours), 1);

        let picker = options.build_picker().expect("picker");
        assert_eq!(picker.full_format(), "MM/DD/YYYY");
        assert_eq!(picker.default_view_mode(), Some(ViewMode::Days));
        assert_eq!(picker.input_text(), "06/16/2015");
    }

    #[test]
    fn json_numeric_value_infers_timestamp_mode() {
        let options = PickerOptions::from_json_str(r#"{"value": 1434412800000, "shouldHideInput": true}"#)
            .expect("valid json");
        let picker = options.build_picker().expect("picker");
        assert_eq!(picker.value(), &Value::Number(1_434_412_800_000));
        assert_eq!(picker.date_type_mode(), DateTypeMode::UtcMsTimestamp);
        assert!(picker.is_static());
        assert!(picker.is_calendar_visible());
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let input = PickerOptions::from_yaml_str("{}")
            .and_then(|options| options.build_input())
            .expect("input");
        assert_eq!(input.picker().full_format(), "MM/DD/YYYY h:mm A");
        assert_eq!(crate::widgets::traits::Drawable::id(&input), "date");
    }

    #[test]
    fn rejects_unknown_locale_and_mode() {
        let options = PickerOptions::from_yaml_str("locale: xx").expect("valid yaml");
        assert!(matches!(options.build_picker(), Err(ConfigError::UnknownLocale(name)) if name == "xx"));

        let options = PickerOptions::from_yaml_str("dateTypeMode: moment").expect("valid yaml");
        assert!(matches!(options.build_picker(), Err(ConfigError::InvalidDateTypeMode(_))));
    }

    #[test]
    fn malformed_input_reports_parser_errors() {
        assert!(matches!(PickerOptions::from_yaml_str("dateFormat: [1, 2]"), Err(ConfigError::Yaml(_))));
        assert!(matches!(PickerOptions::from_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn from_path_picks_parser_by_extension() {
        let dir = std::env::temp_dir();
        let json = dir.join(format!("steply-datetime-{}.json", std::process::id()));
        std::fs::write(&json, r#"{"label": "From JSON", "locale": "de"}"#).expect("write json");
        let options = PickerOptions::from_path(&json).expect("load json");
        std::fs::remove_file(&json).expect("remove json");
        assert_eq!(options.label.as_deref(), Some("From JSON"));
        assert_eq!(options.locale().expect("locale").month_short(3), "März");

        let missing = dir.join("steply-datetime-missing.yaml");
        assert!(matches!(PickerOptions::from_path(&missing), Err(ConfigError::Io { .. })));
    }
}
