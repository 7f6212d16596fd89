use super::locale::Locale;
use super::token::{FieldToken, FormatToken, tokenize};
use crate::core::calendar::{self, CalendarValue};
use crate::core::value::Value;
use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};

/// Converts between external values and calendar values for one locale.
///
/// `today` fills in the date when a format carries no year or month.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'a> {
    locale: &'a Locale,
    today: NaiveDate,
}

#[derive(Debug, Default)]
struct Fields {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    millisecond: Option<u32>,
    afternoon: Option<bool>,
}

impl<'a> Normalizer<'a> {
    pub fn new(locale: &'a Locale, today: NaiveDate) -> Self {
        Self { locale, today }
    }

    /// Text is parsed strictly against `full_format`; numbers are epoch
    /// milliseconds; calendar values pass through.
    pub fn parse(&self, raw: &Value, full_format: &str) -> Option<CalendarValue> {
        match raw {
            Value::None => None,
            Value::Text(text) => self.parse_text(text, full_format),
            Value::Number(millis) => calendar::from_epoch_millis(*millis),
            Value::DateTime(value) => Some(*value),
        }
    }

    /// Accepts `text` only if formatting the parsed value reproduces it.
    pub fn parse_text(&self, text: &str, full_format: &str) -> Option<CalendarValue> {
        if text.is_empty() || full_format.is_empty() {
            return None;
        }
        let tokens = tokenize(full_format);
        let parsed = self.scan(&tokens, text)?;
        if self.format_tokens(parsed, &tokens) == text {
            Some(parsed)
        } else {
            None
        }
    }

    pub fn format(&self, value: CalendarValue, format: &str) -> String {
        self.format_tokens(value, &tokenize(format))
    }

    fn format_tokens(&self, value: CalendarValue, tokens: &[FormatToken]) -> String {
        let mut out = String::new();
        for token in tokens {
            match token {
                FormatToken::Literal(text) => out.push_str(text),
                FormatToken::Field(field) => out.push_str(&self.format_field(value, *field)),
            }
        }
        out
    }

    fn format_field(&self, value: CalendarValue, field: FieldToken) -> String {
        let weekday = value.weekday().num_days_from_sunday() as usize;
        let hour12 = match value.hour() % 12 {
            0 => 12,
            hour => hour,
        };
        match field {
            FieldToken::Year4 => format!("{:04}", value.year()),
            FieldToken::Year2 => format!("{:02}", value.year().rem_euclid(100)),
            FieldToken::Month => value.month().to_string(),
            FieldToken::MonthPadded => format!("{:02}", value.month()),
            FieldToken::MonthShort => self.locale.month_short(value.month()).to_string(),
            FieldToken::MonthLong => self.locale.month_name(value.month()).to_string(),
            FieldToken::Day => value.day().to_string(),
            FieldToken::DayPadded => format!("{:02}", value.day()),
            FieldToken::WeekdayNumber => weekday.to_string(),
            FieldToken::WeekdayMin => self.locale.weekdays_min[weekday].to_string(),
            FieldToken::WeekdayShort => self.locale.weekdays_short[weekday].to_string(),
            FieldToken::WeekdayLong => self.locale.weekdays[weekday].to_string(),
            FieldToken::Hour24 => value.hour().to_string(),
            FieldToken::Hour24Padded => format!("{:02}", value.hour()),
            FieldToken::Hour12 => hour12.to_string(),
            FieldToken::Hour12Padded => format!("{hour12:02}"),
            FieldToken::Minute => value.minute().to_string(),
            FieldToken::MinutePadded => format!("{:02}", value.minute()),
            FieldToken::Second => value.second().to_string(),
            FieldToken::SecondPadded => format!("{:02}", value.second()),
            FieldToken::Millisecond => format!("{:03}", calendar::millisecond(value)),
            FieldToken::MeridiemUpper => self.locale.meridiem(value.hour(), false),
            FieldToken::MeridiemLower => self.locale.meridiem(value.hour(), true),
        }
    }

    fn scan(&self, tokens: &[FormatToken], text: &str) -> Option<CalendarValue> {
        let mut fields = Fields::default();
        let mut rest = text;

        for token in tokens {
            match token {
                FormatToken::Literal(literal) => {
                    rest = rest.strip_prefix(literal.as_str())?;
                }
                FormatToken::Field(field) => {
                    rest = self.scan_field(*field, rest, &mut fields)?;
                }
            }
        }

        if !rest.is_empty() {
            return None;
        }
        self.assemble(fields)
    }

    fn scan_field<'t>(&self, field: FieldToken, input: &'t str, fields: &mut Fields) -> Option<&'t str> {
        match field {
            FieldToken::Year4 => {
                let (year, rest) = take_digits(input, 4, 4)?;
                fields.year = Some(year as i32);
                Some(rest)
            }
            FieldToken::Year2 => {
                let (year, rest) = take_digits(input, 2, 2)?;
                let century = if year > 68 { 1900 } else { 2000 };
                fields.year = Some(century + year as i32);
                Some(rest)
            }
            FieldToken::Month => assign(&mut fields.month, take_digits(input, 1, 2)),
            FieldToken::MonthPadded => assign(&mut fields.month, take_digits(input, 2, 2)),
            FieldToken::MonthShort => assign(&mut fields.month, take_name(input, &self.locale.months_short)),
            FieldToken::MonthLong => assign(&mut fields.month, take_name(input, &self.locale.months)),
            FieldToken::Day => assign(&mut fields.day, take_digits(input, 1, 2)),
            FieldToken::DayPadded => assign(&mut fields.day, take_digits(input, 2, 2)),
            FieldToken::WeekdayNumber => take_digits(input, 1, 1).map(|(_, rest)| rest),
            FieldToken::WeekdayMin => take_name(input, &self.locale.weekdays_min).map(|(_, rest)| rest),
            FieldToken::WeekdayShort => take_name(input, &self.locale.weekdays_short).map(|(_, rest)| rest),
            FieldToken::WeekdayLong => take_name(input, &self.locale.weekdays).map(|(_, rest)| rest),
            FieldToken::Hour24 | FieldToken::Hour12 => assign(&mut fields.hour, take_digits(input, 1, 2)),
            FieldToken::Hour24Padded | FieldToken::Hour12Padded => {
                assign(&mut fields.hour, take_digits(input, 2, 2))
            }
            FieldToken::Minute => assign(&mut fields.minute, take_digits(input, 1, 2)),
            FieldToken::MinutePadded => assign(&mut fields.minute, take_digits(input, 2, 2)),
            FieldToken::Second => assign(&mut fields.second, take_digits(input, 1, 2)),
            FieldToken::SecondPadded => assign(&mut fields.second, take_digits(input, 2, 2)),
            FieldToken::Millisecond => assign(&mut fields.millisecond, take_digits(input, 3, 3)),
            FieldToken::MeridiemUpper | FieldToken::MeridiemLower => {
                let (index, rest) = take_name(input, &self.locale.meridiem)?;
                fields.afternoon = Some(index == 2);
                Some(rest)
            }
        }
    }

    fn assemble(&self, fields: Fields) -> Option<CalendarValue> {
        let year = fields.year.unwrap_or(self.today.year());
        let month = match (fields.year, fields.month) {
            (_, Some(month)) => month,
            (Some(_), None) => 1,
            (None, None) => self.today.month(),
        };
        let day = match fields.day {
            Some(day) => day,
            None if fields.year.is_none() && fields.month.is_none() => self.today.day(),
            None => 1,
        };

        let mut hour = fields.hour.unwrap_or(0);
        if let Some(afternoon) = fields.afternoon {
            hour = hour % 12 + if afternoon { 12 } else { 0 };
        }

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let time = NaiveTime::from_hms_milli_opt(
            hour,
            fields.minute.unwrap_or(0),
            fields.second.unwrap_or(0),
            fields.millisecond.unwrap_or(0),
        )?;
        Some(date.and_time(time))
    }
}

fn assign<'t>(slot: &mut Option<u32>, scanned: Option<(u32, &'t str)>) -> Option<&'t str> {
    let (value, rest) = scanned?;
    *slot = Some(value);
    Some(rest)
}

fn take_digits(input: &str, min: usize, max: usize) -> Option<(u32, &str)> {
    let len = input
        .bytes()
        .take(max)
        .take_while(|byte| byte.is_ascii_digit())
        .count();
    if len < min {
        return None;
    }
    let value = input[..len].parse::<u32>().ok()?;
    Some((value, &input[len..]))
}

/// Case-insensitive longest match against `names`; returns the 1-based index.
fn take_name<'t>(input: &'t str, names: &[&str]) -> Option<(u32, &'t str)> {
    let lowered = input.to_lowercase();
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty() && lowered.starts_with(&name.to_lowercase()))
        .max_by_key(|(_, name)| name.len())
        .and_then(|(index, name)| {
            let rest = input.get(name.len()..)?;
            Some((index as u32 + 1, rest))
        })
}

#[cfg(test)]
mod tests {
    use super::Normalizer;
    use crate::core::calendar::{self, CalendarValue};
    use crate::core::value::Value;
    use crate::format::Locale;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2019, 1, 1).expect("date")
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> CalendarValue {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .expect("valid datetime")
    }

    #[test]
    fn parses_exact_date_text() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        assert_eq!(
            normalizer.parse_text("06/16/2015", "MM/DD/YYYY"),
            Some(at(2015, 6, 16, 0, 0))
        );
    }

    #[test]
    fn rejects_partial_and_ambiguous_text() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        assert_eq!(normalizer.parse_text("06/16/201", "MM/DD/YYYY"), None);
        assert_eq!(normalizer.parse_text("6/16/2015", "MM/DD/YYYY"), None);
        assert_eq!(normalizer.parse_text("13/2015", "MM/YYYY"), None);
        assert_eq!(normalizer.parse_text("02/30/2015", "MM/DD/YYYY"), None);
        assert_eq!(normalizer.parse_text("06/16/2015 ", "MM/DD/YYYY"), None);
        assert_eq!(normalizer.parse_text("", "MM/DD/YYYY"), None);
    }

    #[test]
    fn parses_twelve_hour_clock_with_meridiem() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        let format = "MM/DD/YYYY h:mm A";
        assert_eq!(
            normalizer.parse_text("06/16/2015 1:45 PM", format),
            Some(at(2015, 6, 16, 13, 45))
        );
        assert_eq!(
            normalizer.parse_text("06/16/2015 12:05 AM", format),
            Some(at(2015, 6, 16, 0, 5))
        );
        assert_eq!(normalizer.parse_text("06/16/2015 0:05 AM", format), None);
    }

    #[test]
    fn time_only_format_uses_today() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        assert_eq!(normalizer.parse_text("09:30", "HH:mm"), Some(at(2019, 1, 1, 9, 30)));
    }

    #[test]
    fn year_only_format_starts_in_january() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        assert_eq!(normalizer.parse_text("2015", "YYYY"), Some(at(2015, 1, 1, 0, 0)));
        assert_eq!(normalizer.parse_text("06/2015", "MM/YYYY"), Some(at(2015, 6, 1, 0, 0)));
    }

    #[test]
    fn month_names_match_case_insensitively_but_round_trip_strictly() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        assert_eq!(
            normalizer.parse_text("June 16, 2015", "MMMM D, YYYY"),
            Some(at(2015, 6, 16, 0, 0))
        );
        assert_eq!(normalizer.parse_text("june 16, 2015", "MMMM D, YYYY"), None);
    }

    #[test]
    fn format_round_trips_at_format_precision() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        let format = "ddd DD MMM YY HH:mm:ss.SSS a";
        let value = NaiveDate::from_ymd_opt(2031, 11, 3)
            .and_then(|date| date.and_hms_milli_opt(17, 4, 9, 42))
            .expect("valid datetime");
        let text = normalizer.format(value, format);
        assert_eq!(text, "Mon 03 Nov 31 17:04:09.042 pm");
        assert_eq!(normalizer.parse_text(&text, format), Some(value));
    }

    #[test]
    fn numbers_and_dates_pass_through() {
        let locale = Locale::english();
        let normalizer = Normalizer::new(&locale, today());
        let value = at(2015, 6, 16, 0, 0);
        let millis = calendar::to_epoch_millis(value);
        assert_eq!(normalizer.parse(&Value::Number(millis), "anything"), Some(value));
        assert_eq!(normalizer.parse(&Value::DateTime(value), ""), Some(value));
        assert_eq!(normalizer.parse(&Value::None, "MM/DD/YYYY"), None);
    }
}
